//! CLI Command Handlers
//!
//! Implementation of the `discover` and `pools` commands.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::adapters::birdeye::BirdeyeClient;
use crate::adapters::geckoterminal::GeckoTerminalClient;
use crate::application::report;
use crate::application::{PaginationSettings, PaginationStop, PoolEnumerator, TokenDiscovery};
use crate::config::{load_config, Config};
use crate::domain::WatchlistStore;

/// Config file used when `--config` is not given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "config/scout.toml";

/// token-scout - Solana token watchlist builder
#[derive(Parser, Debug)]
#[command(
    name = "token-scout",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Solana token watchlist builder (BirdEye + GeckoTerminal)",
    long_about = "token-scout pages through BirdEye's token list, keeps tokens inside a \
                  market-cap band with enough daily volume, and enumerates their pools \
                  on GeckoTerminal."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, filter and rank tokens; write the watchlist
    Discover(DiscoverCmd),

    /// Enumerate pools for every token on the watchlist
    Pools(PoolsCmd),
}

impl Command {
    /// Config file path given on the command line, if any
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Command::Discover(cmd) => cmd.config.as_deref(),
            Command::Pools(cmd) => cmd.config.as_deref(),
        }
    }
}

/// Build the token watchlist
#[derive(Parser, Debug)]
pub struct DiscoverCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the maximum number of tokens to fetch
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Override the output directory
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Enumerate pools for whitelisted tokens
#[derive(Parser, Debug)]
pub struct PoolsCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the output directory (watchlist is read from here too)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Load the config named on the command line, else the default file if
/// present, else built-in defaults
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config(default_path)
            .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_PATH));
    }

    Ok(Config::default())
}

fn apply_output_override(config: &mut Config, output_dir: Option<&PathBuf>) {
    if let Some(dir) = output_dir {
        config.output.output_dir = dir.to_string_lossy().into_owned();
    }
}

/// Execute a parsed command
pub async fn execute(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Discover(cmd) => discover_command(cmd, config).await,
        Command::Pools(cmd) => pools_command(cmd, config).await,
    }
}

async fn discover_command(cmd: DiscoverCmd, mut config: Config) -> Result<()> {
    apply_output_override(&mut config, cmd.output_dir.as_ref());
    if let Some(max_tokens) = cmd.max_tokens {
        config.birdeye.max_tokens = max_tokens;
    }

    let api_key = config.birdeye.require_api_key()?;
    let client = BirdeyeClient::new(config.birdeye.client_config(api_key))
        .context("Failed to create BirdEye client")?;

    let criteria = config.criteria();
    let settings = PaginationSettings {
        max_total: config.birdeye.max_tokens,
        page_limit: config.birdeye.pagination_limit,
        rate_limit_delay: config.birdeye.rate_limit_delay(),
    };

    report::print_banner("BirdEye Token Filter - Target List Generator");
    println!("{}", report::render_criteria(&criteria));
    println!();

    let discovery = TokenDiscovery::new(client, criteria, settings);
    let outcome = discovery.run().await;

    if let PaginationStop::FetchFailed { offset, error } = &outcome.stop {
        println!("Stopped early at offset {}: {}", offset, error);
    }

    if outcome.fetched == 0 {
        println!("No tokens fetched");
        return Ok(());
    }

    println!("{}", report::render_match_summary(outcome.ranked.len(), outcome.fetched));
    println!();
    report::print_watchlist(&outcome.ranked);

    let store = WatchlistStore::new(config.output.paths());
    store
        .persist(&outcome.ranked, &criteria, Utc::now())
        .context("Failed to write watchlist")?;

    println!();
    println!("Saved to: {}", store.paths().tokens_json.display());
    println!("Address list: {}", store.paths().addresses_txt.display());

    Ok(())
}

async fn pools_command(cmd: PoolsCmd, mut config: Config) -> Result<()> {
    apply_output_override(&mut config, cmd.output_dir.as_ref());

    let store = WatchlistStore::new(config.output.paths());
    let watchlist = store
        .load_watchlist()
        .context("Failed to load watchlist; run `discover` first")?;
    let addresses = watchlist.addresses();

    let client = GeckoTerminalClient::new(config.geckoterminal.client_config())
        .context("Failed to create GeckoTerminal client")?;
    let enumerator = PoolEnumerator::new(client, config.geckoterminal.rate_limit_delay());

    println!("Loading pools for {} whitelisted tokens...", addresses.len());
    let index = enumerator.enumerate(&addresses).await;

    store
        .save_pool_index(&index, addresses.len(), Utc::now())
        .context("Failed to write pool index")?;

    println!();
    print!("{}", report::render_pool_summary(&index, addresses.len()));
    println!("Saved to: {}", store.paths().pools_json.display());

    Ok(())
}
