//! Domain Layer - Watchlist types and rules
//!
//! Pure types and logic for the token watchlist. Network access happens
//! through the ports layer; the only I/O here is artifact persistence.
//!
//! - `token`: token listings, filter criteria, predicate and ranking
//! - `pool`: liquidity pools grouped per whitelisted token
//! - `watchlist_store`: JSON/text artifact persistence

pub mod token;
pub mod pool;
pub mod watchlist_store;

pub use token::{
    filter_tokens, passes_filter, rank, rolling_daily_volume, CriteriaError, FilterCriteria,
    TokenRecord,
};
pub use pool::{PoolIndex, PoolRecord};
pub use watchlist_store::{
    render_address_list, render_watchlist, OutputPaths, PersistError, WatchlistDocument,
    WatchlistEntry, WatchlistStore,
};
