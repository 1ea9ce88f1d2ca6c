//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement:
//! - Token catalog (paginated listings sorted by volume)
//! - Pool lookup per token
//!
//! `mocks` provides scripted implementations for tests.

pub mod market_data;
pub mod mocks;

pub use market_data::{FetchError, PoolSource, TokenListingSource, TokenPage};
