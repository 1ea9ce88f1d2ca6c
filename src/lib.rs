//! token-scout - Solana token watchlist builder
//!
//! Pages through BirdEye's token list, keeps tokens inside a market-cap band
//! with enough daily volume, ranks them by volume, and writes a watchlist.
//! A second stage looks up each watchlisted token's pools on GeckoTerminal.
//!
//! # Modules
//!
//! - `domain`: Core records and rules (TokenRecord, FilterCriteria, PoolIndex, WatchlistStore)
//! - `ports`: Trait abstractions (TokenListingSource, PoolSource)
//! - `adapters`: External implementations (BirdEye, GeckoTerminal, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Discovery and pool enumeration use cases

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
