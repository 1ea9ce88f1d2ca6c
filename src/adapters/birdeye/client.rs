//! BirdEye Token List Client
//!
//! Fetches pages of the Solana token catalog sorted by 24h volume from
//! BirdEye's public API. One request per page, no caching.

use std::time::Duration;
use async_trait::async_trait;

use super::types::TokenListResponse;
use crate::adapters::http::{HttpFetcher, DEFAULT_TIMEOUT};
use crate::domain::TokenRecord;
use crate::ports::{FetchError, TokenListingSource, TokenPage};

/// BirdEye API base URL
pub const BIRDEYE_BASE_URL: &str = "https://public-api.birdeye.so";

/// Largest page the token list endpoint accepts
pub const MAX_PAGE_LIMIT: usize = 50;

/// BirdEye client configuration
#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    /// API base URL
    pub base_url: String,
    /// API key sent as `X-API-KEY`
    pub api_key: String,
    /// Chain identifier (`x-chain` / `chain` parameter)
    pub chain: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            base_url: BIRDEYE_BASE_URL.to_string(),
            api_key: String::new(),
            chain: "solana".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BirdeyeConfig {
    /// Create config with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// BirdEye token list client
#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    config: BirdeyeConfig,
    fetcher: HttpFetcher,
}

impl BirdeyeClient {
    pub fn new(config: BirdeyeConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config.timeout)?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &BirdeyeConfig {
        &self.config
    }

    /// Fetch one page of the token list, highest 24h volume first
    pub async fn fetch_token_list(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<TokenPage, FetchError> {
        let url = format!("{}/defi/tokenlist", self.config.base_url.trim_end_matches('/'));
        let query = [
            ("chain", self.config.chain.clone()),
            ("sort_by", "v24hUSD".to_string()),
            ("sort_type", "desc".to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        let headers = [
            ("X-API-KEY", self.config.api_key.as_str()),
            ("x-chain", self.config.chain.as_str()),
            ("accept", "application/json"),
        ];

        let response: TokenListResponse = self.fetcher.get_json(&url, &query, &headers).await?;

        if !response.success {
            return Err(FetchError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "success=false".to_string()),
            ));
        }

        let tokens = response.data.map(|d| d.tokens).unwrap_or_default();
        let received = tokens.len();
        let records: Vec<TokenRecord> = tokens
            .into_iter()
            .filter_map(|t| t.into_record())
            .collect();

        if records.len() < received {
            tracing::debug!(
                "Dropped {} listings without an address at offset {}",
                received - records.len(),
                offset
            );
        }

        Ok(TokenPage { records, received })
    }
}

#[async_trait]
impl TokenListingSource for BirdeyeClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<TokenPage, FetchError> {
        self.fetch_token_list(offset, limit).await
    }
}
