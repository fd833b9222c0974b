//! `lumina` - serve the memory vault over HTTP

use clap::Parser;
use lumina::config::expand_path;
use lumina::{Config, Core};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line options; flags win over env vars, env vars over the file
#[derive(Parser, Debug)]
#[command(name = "lumina", version)]
#[command(about = "Store and manage memories over a small JSON API", long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(short, long, default_value = "~/.lumina/config.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// SQLite file holding the memories table
    #[arg(long, env = "LUMINA_DB")]
    db: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Write a starter settings file and exit
    #[arg(long)]
    init: bool,
}

impl Cli {
    /// Merge the settings file (if any), environment and flags
    fn resolve_config(&self) -> lumina::Result<Config> {
        let path = expand_path(&self.config);
        let mut config = if path.exists() {
            Config::from_file(&path)?
        } else {
            tracing::warn!("No settings at {}, falling back to defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides();
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(db) = &self.db {
            config.database = db.clone();
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lumina=debug,tower_http=debug"
    } else {
        "lumina=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init {
        let path = expand_path(&cli.config);
        if path.exists() {
            tracing::warn!("Leaving existing settings untouched: {}", path.display());
        } else {
            Config::create_default(&path)?;
            tracing::info!("Wrote starter settings to {}", path.display());
        }
        return Ok(());
    }

    let config = cli.resolve_config()?;
    tracing::info!("Using database {}", config.db_path().display());

    // The table exists before the listener is bound
    let core = Core::new(config)?;
    core.start_api_server().await?;

    Ok(())
}
