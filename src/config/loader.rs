//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/scout.toml.
//! Every section is optional and falls back to built-in defaults, so the
//! tool also runs without a config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::birdeye::{BirdeyeConfig, BIRDEYE_BASE_URL, MAX_PAGE_LIMIT};
use crate::adapters::geckoterminal::{GeckoTerminalConfig, GECKOTERMINAL_BASE_URL};
use crate::domain::token::{
    CriteriaError, FilterCriteria, DEFAULT_MAX_MARKET_CAP, DEFAULT_MIN_DAILY_VOLUME_USD,
    DEFAULT_MIN_MARKET_CAP,
};
use crate::domain::watchlist_store::{
    OutputPaths, DEFAULT_ADDRESSES_FILE, DEFAULT_POOLS_FILE, DEFAULT_TOKENS_FILE,
};

/// Environment variable holding the BirdEye API key
pub const BIRDEYE_API_KEY_ENV: &str = "BIRDEYE_API_KEY";

/// Main configuration structure matching config/scout.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub birdeye: BirdeyeSection,
    #[serde(default)]
    pub filters: FiltersSection,
    #[serde(default)]
    pub geckoterminal: GeckoTerminalSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// BirdEye token list configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BirdeyeSection {
    /// API base URL
    pub base_url: String,
    /// API key (falls back to BIRDEYE_API_KEY env var when empty)
    pub api_key: String,
    /// Chain identifier
    pub chain: String,
    /// Tokens per page (provider maximum is 50)
    pub pagination_limit: usize,
    /// Stop paginating after this many tokens
    pub max_tokens: usize,
    /// Fixed pause between page requests
    pub rate_limit_delay_ms: u64,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for BirdeyeSection {
    fn default() -> Self {
        Self {
            base_url: BIRDEYE_BASE_URL.to_string(),
            api_key: String::new(),
            chain: "solana".to_string(),
            pagination_limit: MAX_PAGE_LIMIT,
            max_tokens: 2000,
            rate_limit_delay_ms: 500,
            timeout_secs: 10,
        }
    }
}

impl BirdeyeSection {
    /// Get API key with environment variable fallback
    /// Checks BIRDEYE_API_KEY env var if config value is empty
    pub fn get_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var(BIRDEYE_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// API key, or an error naming both places it can be set
    pub fn require_api_key(&self) -> Result<String, ConfigError> {
        self.get_api_key().ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "BirdEye API key missing: set birdeye.api_key or {}",
                BIRDEYE_API_KEY_ENV
            ))
        })
    }

    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    /// Client configuration for the BirdEye adapter
    pub fn client_config(&self, api_key: String) -> BirdeyeConfig {
        BirdeyeConfig {
            base_url: self.base_url.clone(),
            api_key,
            chain: self.chain.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Watchlist filter configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    /// Minimum daily volume in USD (24h snapshot)
    pub min_daily_volume_usd: f64,
    /// Minimum market cap in USD
    pub min_market_cap: f64,
    /// Maximum market cap in USD
    pub max_market_cap: f64,
}

impl Default for FiltersSection {
    fn default() -> Self {
        Self {
            min_daily_volume_usd: DEFAULT_MIN_DAILY_VOLUME_USD,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            max_market_cap: DEFAULT_MAX_MARKET_CAP,
        }
    }
}

/// GeckoTerminal pool lookup configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeckoTerminalSection {
    /// API base URL
    pub base_url: String,
    /// Network id
    pub network: String,
    /// Fixed pause between token lookups (~3 req/s at 300)
    pub rate_limit_delay_ms: u64,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for GeckoTerminalSection {
    fn default() -> Self {
        Self {
            base_url: GECKOTERMINAL_BASE_URL.to_string(),
            network: "solana".to_string(),
            rate_limit_delay_ms: 300,
            timeout_secs: 10,
        }
    }
}

impl GeckoTerminalSection {
    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    pub fn client_config(&self) -> GeckoTerminalConfig {
        GeckoTerminalConfig {
            base_url: self.base_url.clone(),
            network: self.network.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Output artifact configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Directory for all artifacts (`~` is expanded)
    pub output_dir: String,
    pub tokens_file: String,
    pub addresses_file: String,
    pub pools_file: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            tokens_file: DEFAULT_TOKENS_FILE.to_string(),
            addresses_file: DEFAULT_ADDRESSES_FILE.to_string(),
            pools_file: DEFAULT_POOLS_FILE.to_string(),
        }
    }
}

impl OutputSection {
    /// Output directory with `~` expanded
    pub fn resolve_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_dir).into_owned())
    }

    /// Artifact paths inside the output directory
    pub fn paths(&self) -> OutputPaths {
        let dir = self.resolve_dir();
        OutputPaths {
            tokens_json: dir.join(&self.tokens_file),
            addresses_txt: dir.join(&self.addresses_file),
            pools_json: dir.join(&self.pools_file),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level when no CLI flag or RUST_LOG is given
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid filter criteria: {0}")]
    CriteriaError(#[from] CriteriaError),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.birdeye.pagination_limit == 0 || self.birdeye.pagination_limit > MAX_PAGE_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "pagination_limit must be 1-{}, got {}",
                MAX_PAGE_LIMIT, self.birdeye.pagination_limit
            )));
        }

        if self.birdeye.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "birdeye.base_url cannot be empty".to_string(),
            ));
        }

        if self.birdeye.chain.is_empty() {
            return Err(ConfigError::ValidationError(
                "birdeye.chain cannot be empty".to_string(),
            ));
        }

        if self.birdeye.timeout_secs == 0 || self.geckoterminal.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.geckoterminal.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "geckoterminal.base_url cannot be empty".to_string(),
            ));
        }

        if self.output.output_dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "output_dir cannot be empty".to_string(),
            ));
        }

        for (name, file) in [
            ("tokens_file", &self.output.tokens_file),
            ("addresses_file", &self.output.addresses_file),
            ("pools_file", &self.output.pools_file),
        ] {
            if file.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        self.criteria().validate()?;

        Ok(())
    }

    /// Filter criteria from the [filters] section
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from(&self.filters)
    }
}

impl From<&FiltersSection> for FilterCriteria {
    fn from(section: &FiltersSection) -> Self {
        FilterCriteria::new(
            section.min_daily_volume_usd,
            section.min_market_cap,
            section.max_market_cap,
        )
    }
}
