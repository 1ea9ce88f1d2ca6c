//! Market Data Ports
//!
//! Provider-agnostic interfaces for the token catalog and the pool lookup.
//! Both share one failure type so the pipelines can apply the same stop
//! policy regardless of which provider failed.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PoolRecord, TokenRecord};

/// Failure of a single provider request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited by provider (HTTP 429)")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Provider rejected request: {0}")]
    Rejected(String),
}

impl FetchError {
    /// Transient failures that a later attempt could succeed on
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Network(_) | FetchError::RateLimited => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::Decode(_) | FetchError::Rejected(_) => false,
        }
    }
}

/// One page of the token catalog.
///
/// `received` counts the listings the provider returned, including any the
/// adapter could not turn into a `TokenRecord`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenPage {
    pub records: Vec<TokenRecord>,
    pub received: usize,
}

impl TokenPage {
    /// Page where every listing converted
    pub fn complete(records: Vec<TokenRecord>) -> Self {
        let received = records.len();
        Self { records, received }
    }

    /// The provider returned no listings: end of catalog
    pub fn is_exhausted(&self) -> bool {
        self.received == 0
    }
}

/// Paginated token catalog sorted by descending 24h volume
#[async_trait]
pub trait TokenListingSource: Send + Sync {
    /// Fetch one page. A page with no listings means the catalog is exhausted.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<TokenPage, FetchError>;
}

/// Pool lookup keyed by token address
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoolSource: Send + Sync {
    /// All known pools trading the token
    async fn fetch_pools(&self, token_address: &str) -> Result<Vec<PoolRecord>, FetchError>;
}
