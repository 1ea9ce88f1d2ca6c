//! Pool Enumeration
//!
//! Looks up pools for each whitelisted token, one token at a time with a
//! fixed pause between lookups. A failed lookup is recorded and skipped;
//! it never stops the run.

use std::time::Duration;

use crate::domain::PoolIndex;
use crate::ports::PoolSource;

/// Progress is logged every this many tokens
const PROGRESS_EVERY: usize = 10;

/// Sequential pool lookup over a list of token addresses
#[derive(Debug)]
pub struct PoolEnumerator<P> {
    source: P,
    delay: Duration,
}

impl<P: PoolSource> PoolEnumerator<P> {
    pub fn new(source: P, delay: Duration) -> Self {
        Self { source, delay }
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Build the pool index for `token_addresses`, in their order
    pub async fn enumerate(&self, token_addresses: &[String]) -> PoolIndex {
        let total = token_addresses.len();
        let mut index = PoolIndex::new();

        tracing::info!("Loading pools for {} whitelisted tokens", total);

        for (i, address) in token_addresses.iter().enumerate() {
            if i % PROGRESS_EVERY == 0 {
                tracing::info!("Progress: {}/{} tokens", i, total);
            }

            match self.source.fetch_pools(address).await {
                Ok(pools) if pools.is_empty() => {
                    tracing::debug!("{}: no pools", short_address(address));
                }
                Ok(pools) => {
                    tracing::info!("{}: {} pools", short_address(address), pools.len());
                    index.insert(address.clone(), pools);
                }
                Err(e) => {
                    tracing::warn!("Failed {}: {}", short_address(address), e);
                    index.record_failure(address.clone());
                }
            }

            if i + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::info!(
            "Found pools for {} tokens ({} pools), {} failed",
            index.tokens_with_pools(),
            index.total_pools(),
            index.failed_tokens().len()
        );

        index
    }
}

/// First 8 characters of an address, for log lines
fn short_address(address: &str) -> &str {
    match address.char_indices().nth(8) {
        Some((idx, _)) => &address[..idx],
        None => address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PoolRecord;
    use crate::ports::market_data::MockPoolSource;
    use crate::ports::mocks::ScriptedPoolSource;
    use crate::ports::FetchError;

    fn pool(address: &str) -> PoolRecord {
        PoolRecord {
            pool_address: address.to_string(),
            dex: "raydium".to_string(),
            liquidity_usd: 10_000.0,
            volume_24h_usd: 2_500.0,
            price_usd: 0.5,
        }
    }

    fn addresses(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failures_are_recorded_and_skipped() {
        let source = ScriptedPoolSource::new()
            .with_pools("MintA", vec![pool("P1"), pool("P2")])
            .with_failure("MintB", FetchError::Status { status: 404, body: String::new() })
            .with_pools("MintC", vec![pool("P3")]);
        let enumerator = PoolEnumerator::new(source, Duration::ZERO);

        let index = enumerator.enumerate(&addresses(&["MintA", "MintB", "MintC"])).await;

        assert_eq!(index.tokens_with_pools(), 2);
        assert_eq!(index.total_pools(), 3);
        assert_eq!(index.failed_tokens(), &["MintB".to_string()]);
        assert_eq!(enumerator.source().calls(), addresses(&["MintA", "MintB", "MintC"]));
    }

    #[tokio::test]
    async fn test_tokens_without_pools_omitted() {
        let source = ScriptedPoolSource::new().with_pools("MintA", vec![pool("P1")]);
        let enumerator = PoolEnumerator::new(source, Duration::ZERO);

        let index = enumerator.enumerate(&addresses(&["MintEmpty", "MintA"])).await;

        assert!(index.get("MintEmpty").is_none());
        assert!(index.failed_tokens().is_empty());
        assert_eq!(index.token_addresses().collect::<Vec<_>>(), vec!["MintA"]);
    }

    #[tokio::test]
    async fn test_index_follows_watchlist_order() {
        let source = ScriptedPoolSource::new()
            .with_pools("Zeta", vec![pool("P1")])
            .with_pools("Alpha", vec![pool("P2")]);
        let enumerator = PoolEnumerator::new(source, Duration::ZERO);

        let index = enumerator.enumerate(&addresses(&["Zeta", "Alpha"])).await;
        assert_eq!(index.token_addresses().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_each_token_queried_once() {
        let mut mock = MockPoolSource::new();
        mock.expect_fetch_pools()
            .withf(|address| address == "MintA")
            .times(1)
            .returning(|_| Ok(vec![pool("P1")]));
        mock.expect_fetch_pools()
            .withf(|address| address == "MintB")
            .times(1)
            .returning(|_| Err(FetchError::Timeout));

        let enumerator = PoolEnumerator::new(mock, Duration::ZERO);
        let index = enumerator.enumerate(&addresses(&["MintA", "MintB"])).await;

        assert_eq!(index.total_pools(), 1);
        assert_eq!(index.failed_tokens(), &["MintB".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_watchlist() {
        let enumerator = PoolEnumerator::new(ScriptedPoolSource::new(), Duration::ZERO);
        let index = enumerator.enumerate(&[]).await;
        assert!(index.is_empty());
        assert!(enumerator.source().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_tokens_only() {
        let delay = Duration::from_millis(300);
        let source = ScriptedPoolSource::new()
            .with_pools("MintA", vec![pool("P1")])
            .with_failure("MintB", FetchError::Timeout);
        let enumerator = PoolEnumerator::new(source, delay);

        let start = tokio::time::Instant::now();
        enumerator.enumerate(&addresses(&["MintA", "MintB", "MintC"])).await;
        let elapsed = start.elapsed();

        // 3 lookups, 2 pauses
        assert_eq!(enumerator.source().calls().len(), 3);
        assert!(elapsed >= delay * 2, "elapsed {:?}", elapsed);
        assert!(elapsed < delay * 3, "elapsed {:?}", elapsed);
    }

    #[test]
    fn test_short_address() {
        assert_eq!(short_address("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"), "DezXAZ8z");
        assert_eq!(short_address("abc"), "abc");
    }
}
