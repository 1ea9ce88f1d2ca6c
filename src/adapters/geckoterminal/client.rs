//! GeckoTerminal Pool Client
//!
//! Looks up every pool trading a given token on one network. Keyless
//! public API; callers are expected to pace requests themselves.

use std::time::Duration;
use async_trait::async_trait;

use super::types::PoolsResponse;
use crate::adapters::http::{HttpFetcher, DEFAULT_TIMEOUT};
use crate::domain::PoolRecord;
use crate::ports::{FetchError, PoolSource};

/// GeckoTerminal API base URL
pub const GECKOTERMINAL_BASE_URL: &str = "https://api.geckoterminal.com/api/v2";

#[derive(Debug, Clone)]
pub struct GeckoTerminalConfig {
    /// API base URL
    pub base_url: String,
    /// Network id (e.g. "solana")
    pub network: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeckoTerminalConfig {
    fn default() -> Self {
        Self {
            base_url: GECKOTERMINAL_BASE_URL.to_string(),
            network: "solana".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeckoTerminalClient {
    config: GeckoTerminalConfig,
    fetcher: HttpFetcher,
}

impl GeckoTerminalClient {
    pub fn new(config: GeckoTerminalConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config.timeout)?;
        Ok(Self { config, fetcher })
    }

    /// Fetch all pools for a token
    pub async fn fetch_token_pools(&self, token_address: &str) -> Result<Vec<PoolRecord>, FetchError> {
        let url = format!(
            "{}/networks/{}/tokens/{}/pools",
            self.config.base_url.trim_end_matches('/'),
            self.config.network,
            token_address
        );

        let response: PoolsResponse = self
            .fetcher
            .get_json(&url, &[], &[("accept", "application/json")])
            .await?;

        Ok(response
            .data
            .into_iter()
            .filter_map(|pool| pool.into_record())
            .collect())
    }
}

#[async_trait]
impl PoolSource for GeckoTerminalClient {
    async fn fetch_pools(&self, token_address: &str) -> Result<Vec<PoolRecord>, FetchError> {
        self.fetch_token_pools(token_address).await
    }
}
