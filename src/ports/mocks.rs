//! Scripted port implementations for tests and dry runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use super::market_data::{FetchError, PoolSource, TokenListingSource, TokenPage};
use crate::domain::{PoolRecord, TokenRecord};

/// Token source backed by an in-memory catalog, sliced by offset/limit
#[derive(Debug, Default, Clone)]
pub struct ScriptedTokenSource {
    catalog: Vec<TokenRecord>,
    failures: HashMap<usize, FetchError>,
    unusable: HashMap<usize, usize>,
    calls: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl ScriptedTokenSource {
    pub fn new(catalog: Vec<TokenRecord>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Fail the n-th call (1-based) with the given error
    pub fn failing_on_call(mut self, call: usize, error: FetchError) -> Self {
        self.failures.insert(call, error);
        self
    }

    /// Answer the n-th call (1-based) with `received` listings, none usable
    pub fn unusable_on_call(mut self, call: usize, received: usize) -> Self {
        self.unusable.insert(call, received);
        self
    }

    /// Recorded (offset, limit) pairs, in call order
    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenListingSource for ScriptedTokenSource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<TokenPage, FetchError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((offset, limit));
            calls.len()
        };

        if let Some(error) = self.failures.get(&call_number) {
            return Err(error.clone());
        }

        if let Some(&received) = self.unusable.get(&call_number) {
            return Ok(TokenPage { records: Vec::new(), received });
        }

        let start = offset.min(self.catalog.len());
        let end = offset.saturating_add(limit).min(self.catalog.len());
        Ok(TokenPage::complete(self.catalog[start..end].to_vec()))
    }
}

/// Pool source answering from a fixed table; unknown tokens have no pools
#[derive(Debug, Default, Clone)]
pub struct ScriptedPoolSource {
    responses: HashMap<String, Result<Vec<PoolRecord>, FetchError>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPoolSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the pools for a token
    pub fn with_pools(mut self, token_address: &str, pools: Vec<PoolRecord>) -> Self {
        self.responses.insert(token_address.to_string(), Ok(pools));
        self
    }

    /// Builder method to make a token's lookup fail
    pub fn with_failure(mut self, token_address: &str, error: FetchError) -> Self {
        self.responses.insert(token_address.to_string(), Err(error));
        self
    }

    /// Token addresses looked up, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoolSource for ScriptedPoolSource {
    async fn fetch_pools(&self, token_address: &str) -> Result<Vec<PoolRecord>, FetchError> {
        self.calls.lock().unwrap().push(token_address.to_string());
        self.responses
            .get(token_address)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
