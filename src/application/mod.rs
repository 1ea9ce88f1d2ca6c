pub mod discovery;
pub mod pool_enumeration;
pub mod report;

pub use discovery::{
    fetch_all, DiscoveryOutcome, FetchSummary, PaginationSettings, PaginationStop, TokenDiscovery,
};
pub use pool_enumeration::PoolEnumerator;
