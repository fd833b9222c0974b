//! Database module for Lumina
//!
//! Provides SQLite storage for memories.

pub mod memories;
pub mod schema;

use crate::error::{CoreError, Result};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Database manager around a single SQLite connection
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
    ready: AtomicBool,
}

impl Database {
    /// Open (or create) the database file
    ///
    /// The schema is not touched until [`Database::init`] runs.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
            path: db_path,
            ready: AtomicBool::new(false),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
            ready: AtomicBool::new(false),
        })
    }

    /// Create tables if they are missing and mark the database ready
    pub fn init(&self) -> Result<()> {
        schema::init_db(&self.conn())?;
        self.ready.store(true, Ordering::Release);
        tracing::info!("Database ready at {}", self.path.display());
        Ok(())
    }

    /// Whether [`Database::init`] has completed
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Lock the connection for synchronous use
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        lock(&self.conn)
    }

    /// Run `f` against the connection on the blocking thread pool
    ///
    /// The lock is held for the duration of `f` and released on every exit path.
    pub async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = lock(&conn);
            f(&*conn)
        })
        .await
        .map_err(|e| CoreError::Task(format!("database task failed: {}", e)))?
    }

    /// Like [`Database::with_conn`], but inside a transaction
    ///
    /// Commits when `f` returns `Ok`; rolls back otherwise.
    pub async fn with_transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T> {
            let mut conn = lock(&conn);
            let tx = conn.transaction()?;
            let value = f(&*tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        .map_err(|e| CoreError::Task(format!("database task failed: {}", e)))?
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

// A panic while holding the lock leaves the connection itself usable
fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// Re-export schema for convenience
pub use schema::init_db;
