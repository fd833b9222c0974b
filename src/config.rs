//! Configuration management for Lumina
//!
//! Loads settings from TOML file at ~/.lumina/config.toml

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data directory (defaults to ~/.lumina)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Database file name, relative to the data directory unless absolute
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".lumina"))
        .unwrap_or_else(|| PathBuf::from(".lumina"))
}

fn default_database() -> PathBuf {
    PathBuf::from("lumina_vault.db")
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server host (default: 127.0.0.1 - localhost only)
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            data_dir: default_data_dir(),
            database: default_database(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path.as_ref());

        if !expanded_path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Get the data directory, expanding ~ if present
    pub fn data_dir(&self) -> PathBuf {
        expand_path(&self.data_dir)
    }

    /// Full path of the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        let database = expand_path(&self.database);
        if database.is_absolute() {
            database
        } else {
            self.data_dir().join(database)
        }
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> SocketAddr {
        use std::net::ToSocketAddrs;

        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], self.server.port)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("LUMINA_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("LUMINA_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                tracing::warn!("Ignoring invalid LUMINA_SERVER_PORT: {}", port);
            }
        }
        if let Ok(data_dir) = std::env::var("LUMINA_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = r#"# Lumina Vault Configuration

# Directory holding the database file (default: ~/.lumina)
# data_dir = "~/.lumina"

# SQLite database file, relative to data_dir unless absolute
database = "lumina_vault.db"

[server]
# Port to listen on (default: 8000)
port = 8000

# Host to bind to
# "127.0.0.1" = localhost only
# "0.0.0.0" = all interfaces
host = "127.0.0.1"
"#;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
