//! token-scout - Solana token watchlist builder
//!
//! `discover` builds the watchlist from BirdEye; `pools` enumerates pools
//! for it via GeckoTerminal.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use token_scout::adapters::cli::{self, execute, resolve_config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Secrets (BIRDEYE_API_KEY) may come from .env
    dotenvy::dotenv().ok();

    let app = cli::init();
    let config = resolve_config(app.command.config_path())?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    execute(app.command, config).await
}

fn init_logging(verbose: bool, debug: bool, default_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}
