//! GeckoTerminal Adapter
//!
//! Pool lookup (`PoolSource`) backed by GeckoTerminal's token pools endpoint.

mod client;
mod types;

pub use client::{GeckoTerminalClient, GeckoTerminalConfig, GECKOTERMINAL_BASE_URL};
pub use types::{PoolAttributes, PoolData, PoolsResponse};
