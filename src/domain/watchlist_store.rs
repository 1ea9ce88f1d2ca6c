//! Watchlist Persistence
//!
//! Writes the discovery artifacts (JSON watchlist, plain address list) and
//! the pool index, and reads the watchlist back for pool enumeration.
//! Every write overwrites the target file; any failure is returned to the
//! caller and ends the run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::pool::PoolIndex;
use super::token::{FilterCriteria, TokenRecord};

/// Default artifact file names
pub const DEFAULT_TOKENS_FILE: &str = "target_tokens.json";
pub const DEFAULT_ADDRESSES_FILE: &str = "target_addresses.txt";
pub const DEFAULT_POOLS_FILE: &str = "whitelisted_pools.json";

#[derive(Error, Debug, Clone)]
pub enum PersistError {
    #[error("Failed to serialize {0}")]
    SerializationError(String),

    #[error("Failed to deserialize {0}")]
    DeserializationError(String),

    #[error("Failed to write {0}")]
    WriteError(String),

    #[error("Failed to read {0}")]
    ReadError(String),

    #[error("Failed to create directory {0}")]
    DirectoryError(String),
}

/// Watchlist JSON document as read back from disk.
///
/// Only `tokens[].address` is required. The timestamp is kept as written,
/// so naive ISO-8601 stamps from other writers still load.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistDocument {
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub total_tokens: Option<usize>,
    pub tokens: Vec<WatchlistEntry>,
}

/// One watchlisted token
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchlistEntry {
    pub address: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl WatchlistDocument {
    /// Token addresses in ranked order
    pub fn addresses(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.address.clone()).collect()
    }
}

/// Borrowed view used when writing, so the result set is not cloned
#[derive(Serialize)]
struct WatchlistView<'a> {
    generated_at: DateTime<Utc>,
    criteria: &'a FilterCriteria,
    total_tokens: usize,
    tokens: &'a [TokenRecord],
}

/// Pool index JSON document
#[derive(Serialize)]
struct PoolIndexView<'a> {
    generated_at: DateTime<Utc>,
    total_tokens: usize,
    tokens_with_pools: usize,
    total_pools: usize,
    pools: &'a PoolIndex,
}

/// Artifact locations
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub tokens_json: PathBuf,
    pub addresses_txt: PathBuf,
    pub pools_json: PathBuf,
}

impl OutputPaths {
    /// Default file names inside a directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            tokens_json: dir.join(DEFAULT_TOKENS_FILE),
            addresses_txt: dir.join(DEFAULT_ADDRESSES_FILE),
            pools_json: dir.join(DEFAULT_POOLS_FILE),
        }
    }
}

/// Reads and writes the artifacts at a fixed set of paths
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    paths: OutputPaths,
}

impl WatchlistStore {
    pub fn new(paths: OutputPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Write both discovery artifacts: the JSON watchlist and the address list
    pub fn persist(
        &self,
        tokens: &[TokenRecord],
        criteria: &FilterCriteria,
        generated_at: DateTime<Utc>,
    ) -> Result<(), PersistError> {
        self.save_watchlist(tokens, criteria, generated_at)?;
        self.save_address_list(tokens)?;
        Ok(())
    }

    /// Write the JSON watchlist
    pub fn save_watchlist(
        &self,
        tokens: &[TokenRecord],
        criteria: &FilterCriteria,
        generated_at: DateTime<Utc>,
    ) -> Result<(), PersistError> {
        let content = render_watchlist(tokens, criteria, generated_at)?;
        write_file(&self.paths.tokens_json, content.as_bytes())?;

        tracing::info!(
            "Watchlist saved: {} tokens -> {}",
            tokens.len(),
            self.paths.tokens_json.display()
        );
        Ok(())
    }

    /// Write one address per line, for every token
    pub fn save_address_list(&self, tokens: &[TokenRecord]) -> Result<(), PersistError> {
        let content = render_address_list(tokens);
        write_file(&self.paths.addresses_txt, content.as_bytes())?;

        tracing::info!("Address list saved: {}", self.paths.addresses_txt.display());
        Ok(())
    }

    /// Load the JSON watchlist
    pub fn load_watchlist(&self) -> Result<WatchlistDocument, PersistError> {
        let path = &self.paths.tokens_json;
        let content = fs::read_to_string(path)
            .map_err(|e| PersistError::ReadError(format!("{}: {}", path.display(), e)))?;

        let document: WatchlistDocument = serde_json::from_str(&content)
            .map_err(|e| PersistError::DeserializationError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            "Watchlist loaded: {} tokens (generated {})",
            document.tokens.len(),
            document.generated_at.as_deref().unwrap_or("unknown")
        );
        Ok(document)
    }

    /// Write the pool index
    pub fn save_pool_index(
        &self,
        index: &PoolIndex,
        total_tokens: usize,
        generated_at: DateTime<Utc>,
    ) -> Result<(), PersistError> {
        let view = PoolIndexView {
            generated_at,
            total_tokens,
            tokens_with_pools: index.tokens_with_pools(),
            total_pools: index.total_pools(),
            pools: index,
        };
        let content = serde_json::to_string_pretty(&view)
            .map_err(|e| PersistError::SerializationError(format!("pool index: {}", e)))?;
        write_file(&self.paths.pools_json, content.as_bytes())?;

        tracing::info!(
            "Pool index saved: {} pools for {} tokens -> {}",
            index.total_pools(),
            index.tokens_with_pools(),
            self.paths.pools_json.display()
        );
        Ok(())
    }
}

/// Render the watchlist JSON document
pub fn render_watchlist(
    tokens: &[TokenRecord],
    criteria: &FilterCriteria,
    generated_at: DateTime<Utc>,
) -> Result<String, PersistError> {
    let view = WatchlistView {
        generated_at,
        criteria,
        total_tokens: tokens.len(),
        tokens,
    };
    serde_json::to_string_pretty(&view)
        .map_err(|e| PersistError::SerializationError(format!("watchlist: {}", e)))
}

/// Render the newline-terminated address list
pub fn render_address_list(tokens: &[TokenRecord]) -> String {
    let mut out = String::with_capacity(tokens.len() * 45);
    for token in tokens {
        out.push_str(&token.address);
        out.push('\n');
    }
    out
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| PersistError::DirectoryError(format!("{}: {}", parent.display(), e)))?;
    }

    fs::write(path, content)
        .map_err(|e| PersistError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::PoolRecord;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample_tokens() -> Vec<TokenRecord> {
        vec![
            TokenRecord::new("MintAAA", "AAA", "Alpha")
                .with_market(5_000_000.0, 90_000.0)
                .with_quote(0.25, 120_000.0),
            TokenRecord::new("MintBBB", "BBB", "Bravo")
                .with_market(800_000.0, 40_000.0)
                .with_quote(0.002, 30_000.0),
        ]
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_default_paths() {
        let paths = OutputPaths::in_dir(Path::new("/tmp/scout"));
        assert_eq!(paths.tokens_json, Path::new("/tmp/scout/target_tokens.json"));
        assert_eq!(paths.addresses_txt, Path::new("/tmp/scout/target_addresses.txt"));
        assert_eq!(paths.pools_json, Path::new("/tmp/scout/whitelisted_pools.json"));
    }

    #[test]
    fn test_watchlist_document_shape() {
        let json = render_watchlist(&sample_tokens(), &FilterCriteria::default(), fixed_time()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["generated_at"], "2026-01-02T03:04:05Z");
        assert_eq!(value["criteria"]["min_daily_volume_usd"], 10_000.0);
        assert_eq!(value["criteria"]["min_market_cap"], 100_000.0);
        assert_eq!(value["criteria"]["max_market_cap"], 30_000_000.0);
        assert_eq!(value["total_tokens"], 2);
        assert_eq!(value["tokens"][0]["address"], "MintAAA");
        assert_eq!(value["tokens"][1]["symbol"], "BBB");
    }

    #[test]
    fn test_address_list_format() {
        assert_eq!(render_address_list(&sample_tokens()), "MintAAA\nMintBBB\n");
        assert_eq!(render_address_list(&[]), "");
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(&dir.path().join("nested")));

        store
            .persist(&sample_tokens(), &FilterCriteria::default(), fixed_time())
            .unwrap();

        let document = store.load_watchlist().unwrap();
        assert_eq!(document.total_tokens, Some(2));
        assert_eq!(document.addresses(), vec!["MintAAA", "MintBBB"]);
        assert_eq!(document.tokens[1].symbol.as_deref(), Some("BBB"));
        assert_eq!(document.generated_at.as_deref(), Some("2026-01-02T03:04:05Z"));

        let addresses = fs::read_to_string(&store.paths().addresses_txt).unwrap();
        assert_eq!(addresses, "MintAAA\nMintBBB\n");
    }

    #[test]
    fn test_persist_overwrites_existing_files() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(dir.path()));

        store
            .persist(&sample_tokens(), &FilterCriteria::default(), fixed_time())
            .unwrap();
        store
            .persist(&sample_tokens()[..1], &FilterCriteria::default(), fixed_time())
            .unwrap();

        let addresses = fs::read_to_string(&store.paths().addresses_txt).unwrap();
        assert_eq!(addresses, "MintAAA\n");
        assert_eq!(store.load_watchlist().unwrap().tokens.len(), 1);
    }

    #[test]
    fn test_load_watchlist_from_other_writer() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(dir.path()));
        // Naive timestamp, partial criteria, provider field names, nulls
        fs::write(
            &store.paths().tokens_json,
            r#"{
                "generated_at": "2025-10-09T08:53:20.123456",
                "criteria": {"min_daily_volume_usd": 10000},
                "total_tokens": 2,
                "tokens": [
                    {"address": "MintAAA", "symbol": null, "name": null, "mc": 1200000},
                    {"address": "MintBBB"}
                ]
            }"#,
        )
        .unwrap();

        let document = store.load_watchlist().unwrap();
        assert_eq!(document.addresses(), vec!["MintAAA", "MintBBB"]);
        assert_eq!(document.generated_at.as_deref(), Some("2025-10-09T08:53:20.123456"));
        assert!(document.tokens[0].symbol.is_none());
    }

    #[test]
    fn test_load_watchlist_requires_addresses() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(dir.path()));
        fs::write(&store.paths().tokens_json, r#"{"tokens": [{"symbol": "NOADDR"}]}"#).unwrap();
        assert!(matches!(
            store.load_watchlist(),
            Err(PersistError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_load_missing_watchlist() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(dir.path()));
        assert!(matches!(store.load_watchlist(), Err(PersistError::ReadError(_))));
    }

    #[test]
    fn test_load_corrupted_watchlist() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(dir.path()));
        fs::write(&store.paths().tokens_json, "{ not json").unwrap();
        assert!(matches!(
            store.load_watchlist(),
            Err(PersistError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(&blocker.join("out")));

        let result = store.persist(&sample_tokens(), &FilterCriteria::default(), fixed_time());
        assert!(matches!(result, Err(PersistError::DirectoryError(_))));
    }

    #[test]
    fn test_pool_index_document() {
        let dir = tempdir().unwrap();
        let store = WatchlistStore::new(OutputPaths::in_dir(dir.path()));

        let mut index = PoolIndex::new();
        index.insert(
            "MintAAA",
            vec![PoolRecord {
                pool_address: "PoolOne".to_string(),
                dex: "raydium".to_string(),
                liquidity_usd: 150_000.0,
                volume_24h_usd: 75_000.0,
                price_usd: 0.25,
            }],
        );
        index.record_failure("MintBBB");

        store.save_pool_index(&index, 2, fixed_time()).unwrap();

        let content = fs::read_to_string(&store.paths().pools_json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["total_tokens"], 2);
        assert_eq!(value["tokens_with_pools"], 1);
        assert_eq!(value["total_pools"], 1);
        assert_eq!(value["pools"]["MintAAA"][0]["dex"], "raydium");
        assert!(value["pools"].get("MintBBB").is_none());
    }
}
