//! Token Listings and Watchlist Filter
//!
//! A `TokenRecord` is one row of the provider's token catalog. The filter
//! keeps tokens whose market cap sits inside a band and whose daily volume
//! clears a floor; `rank` orders the survivors by volume.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default filter bounds
pub const DEFAULT_MIN_DAILY_VOLUME_USD: f64 = 10_000.0;
pub const DEFAULT_MIN_MARKET_CAP: f64 = 100_000.0;
pub const DEFAULT_MAX_MARKET_CAP: f64 = 30_000_000.0;

/// Invalid filter bounds
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidBound { field: &'static str, value: f64 },

    #[error("min_market_cap ({min}) exceeds max_market_cap ({max})")]
    InvertedRange { min: f64, max: f64 },
}

/// One token listing as reported by the market-data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token mint address (unique key)
    pub address: String,
    /// Ticker symbol
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Market capitalization in USD
    pub market_cap: Option<f64>,
    /// Trailing 24-hour volume in USD
    pub volume_24h: Option<f64>,
    /// Price in USD
    pub price: Option<f64>,
    /// Liquidity in USD
    pub liquidity: Option<f64>,
}

impl TokenRecord {
    /// Create a record with only identity fields set
    pub fn new(
        address: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            name: name.into(),
            market_cap: None,
            volume_24h: None,
            price: None,
            liquidity: None,
        }
    }

    /// Set market cap and 24h volume
    pub fn with_market(mut self, market_cap: f64, volume_24h: f64) -> Self {
        self.market_cap = Some(market_cap);
        self.volume_24h = Some(volume_24h);
        self
    }

    /// Set price and liquidity
    pub fn with_quote(mut self, price: f64, liquidity: f64) -> Self {
        self.price = Some(price);
        self.liquidity = Some(liquidity);
        self
    }

    /// Volume used for ordering; missing volume sorts last
    fn sort_volume(&self) -> f64 {
        self.volume_24h.unwrap_or(0.0)
    }
}

/// Average daily volume used by the filter.
///
/// Approximated by the single 24h snapshot the token list returns; a real
/// multi-day average needs one history call per token.
pub fn rolling_daily_volume(record: &TokenRecord) -> Option<f64> {
    record.volume_24h
}

/// Numeric bounds applied to every fetched token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Minimum daily volume in USD
    pub min_daily_volume_usd: f64,
    /// Minimum market cap in USD (inclusive)
    pub min_market_cap: f64,
    /// Maximum market cap in USD (inclusive)
    pub max_market_cap: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_daily_volume_usd: DEFAULT_MIN_DAILY_VOLUME_USD,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            max_market_cap: DEFAULT_MAX_MARKET_CAP,
        }
    }
}

impl FilterCriteria {
    pub fn new(min_daily_volume_usd: f64, min_market_cap: f64, max_market_cap: f64) -> Self {
        Self {
            min_daily_volume_usd,
            min_market_cap,
            max_market_cap,
        }
    }

    /// Validate bounds
    pub fn validate(&self) -> Result<(), CriteriaError> {
        let bounds = [
            ("min_daily_volume_usd", self.min_daily_volume_usd),
            ("min_market_cap", self.min_market_cap),
            ("max_market_cap", self.max_market_cap),
        ];
        for (field, value) in bounds {
            if !value.is_finite() || value < 0.0 {
                return Err(CriteriaError::InvalidBound { field, value });
            }
        }

        if self.min_market_cap > self.max_market_cap {
            return Err(CriteriaError::InvertedRange {
                min: self.min_market_cap,
                max: self.max_market_cap,
            });
        }

        Ok(())
    }
}

/// Check whether a token belongs on the watchlist.
///
/// Missing, zero or non-finite market cap or volume always rejects.
pub fn passes_filter(record: &TokenRecord, criteria: &FilterCriteria) -> bool {
    let (Some(market_cap), Some(volume)) = (record.market_cap, rolling_daily_volume(record)) else {
        return false;
    };

    if !market_cap.is_finite() || !volume.is_finite() {
        return false;
    }

    if market_cap == 0.0 || volume == 0.0 {
        return false;
    }

    if market_cap < criteria.min_market_cap || market_cap > criteria.max_market_cap {
        return false;
    }

    volume >= criteria.min_daily_volume_usd
}

/// Keep only records that pass the filter, preserving input order
pub fn filter_tokens(records: Vec<TokenRecord>, criteria: &FilterCriteria) -> Vec<TokenRecord> {
    records
        .into_iter()
        .filter(|record| passes_filter(record, criteria))
        .collect()
}

/// Sort descending by 24h volume.
///
/// `sort_by` is stable, so equal volumes keep their fetch order.
pub fn rank(mut records: Vec<TokenRecord>) -> Vec<TokenRecord> {
    records.sort_by(|a, b| b.sort_volume().total_cmp(&a.sort_volume()));
    records
}
