//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - BirdEye: paginated token catalog
//! - GeckoTerminal: pool lookup per token
//! - HTTP: shared request layer used by both providers
//! - CLI: Command-line interface handlers

pub mod http;
pub mod birdeye;
pub mod geckoterminal;
pub mod cli;

pub use http::HttpFetcher;
pub use birdeye::{BirdeyeClient, BirdeyeConfig};
pub use geckoterminal::{GeckoTerminalClient, GeckoTerminalConfig};
pub use cli::CliApp;
