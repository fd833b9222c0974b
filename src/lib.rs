//! Lumina - a small HTTP service for storing memories
//!
//! This crate provides:
//! - SQLite storage for memory records
//! - Business logic for create, list, get, update and delete
//! - An HTTP API exposing those operations as JSON
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use lumina::{Config, Core};
//!
//! let config = Config::from_file("~/.lumina/config.toml").unwrap();
//! let core = Core::new(config).unwrap();
//! // core.start_api_server().await.unwrap();
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! lumina --config ~/.lumina/config.toml
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

// Re-export main types for convenience
pub use config::Config;
pub use db::Database;
pub use error::{CoreError, Result};
pub use models::{Memory, MemoryInput};

use std::sync::Arc;

/// Core service that owns the configuration and the store
pub struct Core {
    /// Configuration
    pub config: Config,

    /// Database connection
    pub db: Arc<Database>,
}

impl Core {
    /// Open the configured database and initialize its schema
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(config.db_path())?;
        db.init()?;

        Ok(Core {
            config,
            db: Arc::new(db),
        })
    }

    /// Start the HTTP API server
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting API server on {}", addr);
        api::serve(addr, self.db.clone()).await
    }

    /// Get a reference to the database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}
