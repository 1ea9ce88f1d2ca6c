//! BirdEye Adapter
//!
//! Token catalog source (`TokenListingSource`) backed by BirdEye's
//! `/defi/tokenlist` endpoint.

mod client;
mod types;

pub use client::{BirdeyeClient, BirdeyeConfig, BIRDEYE_BASE_URL, MAX_PAGE_LIMIT};
pub use types::{BirdeyeToken, TokenListData, TokenListResponse};
