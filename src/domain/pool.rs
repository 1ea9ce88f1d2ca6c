//! Liquidity Pools
//!
//! Pools discovered for whitelisted tokens, grouped per token in
//! watchlist order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// One liquidity venue for a token
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct PoolRecord {
    /// Pool account address
    pub pool_address: String,
    /// DEX identifier (e.g. "raydium", "orca")
    pub dex: String,
    /// Pool reserves in USD
    pub liquidity_usd: f64,
    /// 24-hour pool volume in USD
    pub volume_24h_usd: f64,
    /// Base token price in USD
    pub price_usd: f64,
}

/// Pools per token, plus the tokens whose lookup failed.
///
/// Serializes as a JSON object keyed by token address, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolIndex {
    entries: Vec<(String, Vec<PoolRecord>)>,
    failed_tokens: Vec<String>,
}

impl PoolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pools for a token. Empty lists are not stored.
    pub fn insert(&mut self, token_address: impl Into<String>, pools: Vec<PoolRecord>) {
        if pools.is_empty() {
            return;
        }

        let token_address = token_address.into();
        match self.entries.iter_mut().find(|(addr, _)| *addr == token_address) {
            Some((_, existing)) => *existing = pools,
            None => self.entries.push((token_address, pools)),
        }
    }

    /// Record a token whose pool lookup failed
    pub fn record_failure(&mut self, token_address: impl Into<String>) {
        self.failed_tokens.push(token_address.into());
    }

    /// Pools for a token, if any were found
    pub fn get(&self, token_address: &str) -> Option<&[PoolRecord]> {
        self.entries
            .iter()
            .find(|(addr, _)| addr == token_address)
            .map(|(_, pools)| pools.as_slice())
    }

    /// Number of tokens with at least one pool
    pub fn tokens_with_pools(&self) -> usize {
        self.entries.len()
    }

    /// Total pools across all tokens
    pub fn total_pools(&self) -> usize {
        self.entries.iter().map(|(_, pools)| pools.len()).sum()
    }

    pub fn failed_tokens(&self) -> &[String] {
        &self.failed_tokens
    }

    /// Token addresses in insertion order
    pub fn token_addresses(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(addr, _)| addr.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PoolIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (address, pools) in &self.entries {
            map.serialize_entry(address, pools)?;
        }
        map.end()
    }
}
