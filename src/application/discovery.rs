//! Token Discovery Pipeline
//!
//! Paginated fetch of the token catalog, followed by filter and rank.
//! Strictly sequential: each page is awaited before the next is requested,
//! with a fixed pause in between. A failed page ends pagination but the
//! records gathered so far are kept.

use std::time::Duration;

use crate::domain::{filter_tokens, rank, FilterCriteria, TokenRecord};
use crate::ports::{FetchError, TokenListingSource};

/// Pagination settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationSettings {
    /// Stop once this many records are collected
    pub max_total: usize,
    /// Page size
    pub page_limit: usize,
    /// Pause between consecutive page requests
    pub rate_limit_delay: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_total: 2000,
            page_limit: 50,
            rate_limit_delay: Duration::from_millis(500),
        }
    }
}

/// Why pagination ended
#[derive(Debug, Clone, PartialEq)]
pub enum PaginationStop {
    /// `max_total` records collected
    ReachedLimit,
    /// Provider returned no listings at this offset
    EndOfCatalog { offset: usize },
    /// Page request failed at this offset
    FetchFailed { offset: usize, error: FetchError },
}

/// Records collected by `fetch_all`, in fetch order
#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub records: Vec<TokenRecord>,
    pub stop: PaginationStop,
    /// Page requests issued
    pub requests: usize,
}

/// Fetch pages at increasing offsets until the limit, an empty page, or a failure.
pub async fn fetch_all<S>(source: &S, settings: &PaginationSettings) -> FetchSummary
where
    S: TokenListingSource + ?Sized,
{
    let mut records: Vec<TokenRecord> = Vec::new();
    let mut offset = 0usize;
    let mut requests = 0usize;
    let page_limit = settings.page_limit.max(1);

    tracing::info!(
        "Fetching up to {} tokens ({} per page)",
        settings.max_total,
        page_limit
    );

    let stop = loop {
        if records.len() >= settings.max_total || offset >= settings.max_total {
            break PaginationStop::ReachedLimit;
        }

        let limit = page_limit.min(settings.max_total - offset);
        tracing::debug!("Fetching tokens {}-{}", offset, offset + limit);
        requests += 1;

        match source.fetch_page(offset, limit).await {
            Err(error) => {
                tracing::warn!("Failed to fetch at offset {}: {}", offset, error);
                break PaginationStop::FetchFailed { offset, error };
            }
            Ok(page) if page.is_exhausted() => {
                tracing::info!("Reached end of token list at offset {}", offset);
                break PaginationStop::EndOfCatalog { offset };
            }
            Ok(page) => {
                if page.records.len() < page.received {
                    tracing::debug!(
                        "Skipped {} unusable listings at offset {}",
                        page.received - page.records.len(),
                        offset
                    );
                }
                records.extend(page.records);
                offset += limit;

                if records.len() < settings.max_total && offset < settings.max_total {
                    tokio::time::sleep(settings.rate_limit_delay).await;
                }
            }
        }
    };

    records.truncate(settings.max_total);
    tracing::info!("Fetched {} total tokens in {} requests", records.len(), requests);

    FetchSummary {
        records,
        stop,
        requests,
    }
}

/// Result of one discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Records fetched before filtering
    pub fetched: usize,
    /// Filtered records, highest volume first
    pub ranked: Vec<TokenRecord>,
    pub stop: PaginationStop,
}

/// Fetch, filter and rank against one token source
#[derive(Debug)]
pub struct TokenDiscovery<S> {
    source: S,
    criteria: FilterCriteria,
    settings: PaginationSettings,
}

impl<S: TokenListingSource> TokenDiscovery<S> {
    pub fn new(source: S, criteria: FilterCriteria, settings: PaginationSettings) -> Self {
        Self {
            source,
            criteria,
            settings,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the pipeline once
    pub async fn run(&self) -> DiscoveryOutcome {
        let summary = fetch_all(&self.source, &self.settings).await;
        let fetched = summary.records.len();

        let filtered = filter_tokens(summary.records, &self.criteria);
        tracing::debug!("{} of {} fetched tokens passed the filter", filtered.len(), fetched);

        DiscoveryOutcome {
            fetched,
            ranked: rank(filtered),
            stop: summary.stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::ScriptedTokenSource;

    fn catalog(n: usize) -> Vec<TokenRecord> {
        (0..n)
            .map(|i| {
                TokenRecord::new(format!("Mint{:04}", i), format!("T{}", i), format!("Token {}", i))
                    .with_market(1_000_000.0, 1_000_000.0 - i as f64)
            })
            .collect()
    }

    fn settings(max_total: usize, page_limit: usize) -> PaginationSettings {
        PaginationSettings {
            max_total,
            page_limit,
            rate_limit_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_pagination_ends_on_empty_page() {
        let source = ScriptedTokenSource::new(catalog(120));
        let summary = fetch_all(&source, &settings(2000, 50)).await;

        assert_eq!(summary.records.len(), 120);
        // ceil(120 / 50) + 1 trailing empty page
        assert_eq!(summary.requests, 4);
        assert_eq!(summary.stop, PaginationStop::EndOfCatalog { offset: 150 });
        assert_eq!(source.calls(), vec![(0, 50), (50, 50), (100, 50), (150, 50)]);
    }

    #[tokio::test]
    async fn test_pagination_exact_multiple() {
        let source = ScriptedTokenSource::new(catalog(100));
        let summary = fetch_all(&source, &settings(2000, 50)).await;

        assert_eq!(summary.records.len(), 100);
        assert_eq!(summary.requests, 3);
    }

    #[tokio::test]
    async fn test_pagination_stops_at_max_total() {
        let source = ScriptedTokenSource::new(catalog(500));
        let summary = fetch_all(&source, &settings(120, 50)).await;

        assert_eq!(summary.records.len(), 120);
        assert_eq!(summary.stop, PaginationStop::ReachedLimit);
        // Last page shrinks to the remaining budget
        assert_eq!(source.calls(), vec![(0, 50), (50, 50), (100, 20)]);
    }

    #[tokio::test]
    async fn test_zero_max_total_issues_no_requests() {
        let source = ScriptedTokenSource::new(catalog(10));
        let summary = fetch_all(&source, &settings(0, 50)).await;

        assert!(summary.records.is_empty());
        assert_eq!(summary.requests, 0);
        assert_eq!(summary.stop, PaginationStop::ReachedLimit);
    }

    #[tokio::test]
    async fn test_failure_keeps_partial_results() {
        let source = ScriptedTokenSource::new(catalog(500))
            .failing_on_call(3, FetchError::Network("connection reset".into()));
        let summary = fetch_all(&source, &settings(2000, 50)).await;

        assert_eq!(summary.records.len(), 100);
        assert_eq!(summary.requests, 3);
        assert!(matches!(
            summary.stop,
            PaginationStop::FetchFailed { offset: 100, .. }
        ));
    }

    #[tokio::test]
    async fn test_page_of_unusable_listings_does_not_end_pagination() {
        let source = ScriptedTokenSource::new(catalog(120)).unusable_on_call(1, 50);
        let summary = fetch_all(&source, &settings(2000, 50)).await;

        // First page contributes nothing, the rest of the catalog is still walked
        assert_eq!(summary.records.len(), 70);
        assert_eq!(summary.records[0].address, "Mint0050");
        assert_eq!(summary.requests, 4);
        assert_eq!(summary.stop, PaginationStop::EndOfCatalog { offset: 150 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_pages_only() {
        let delay = Duration::from_millis(500);
        let source = ScriptedTokenSource::new(catalog(120));
        let paced = PaginationSettings {
            rate_limit_delay: delay,
            ..settings(2000, 50)
        };

        let start = tokio::time::Instant::now();
        let summary = fetch_all(&source, &paced).await;
        let elapsed = start.elapsed();

        // 4 requests, 3 pauses
        assert_eq!(summary.requests, 4);
        assert!(elapsed >= delay * 3, "elapsed {:?}", elapsed);
        assert!(elapsed < delay * 4, "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_after_reaching_limit() {
        let delay = Duration::from_millis(500);
        let source = ScriptedTokenSource::new(catalog(500));
        let paced = PaginationSettings {
            rate_limit_delay: delay,
            ..settings(100, 50)
        };

        let start = tokio::time::Instant::now();
        let summary = fetch_all(&source, &paced).await;
        let elapsed = start.elapsed();

        assert_eq!(summary.requests, 2);
        assert!(elapsed >= delay, "elapsed {:?}", elapsed);
        assert!(elapsed < delay * 2, "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_records_keep_fetch_order() {
        let source = ScriptedTokenSource::new(catalog(7));
        let summary = fetch_all(&source, &settings(2000, 3)).await;

        let addresses: Vec<_> = summary.records.iter().map(|r| r.address.clone()).collect();
        let expected: Vec<_> = catalog(7).into_iter().map(|r| r.address).collect();
        assert_eq!(addresses, expected);
    }

    #[tokio::test]
    async fn test_discovery_filters_and_ranks() {
        let records = vec![
            TokenRecord::new("low-cap", "LOW", "Low").with_market(50_000.0, 20_000.0),
            TokenRecord::new("thin", "THIN", "Thin").with_market(200_000.0, 5_000.0),
            TokenRecord::new("mid", "MID", "Mid").with_market(5_000_000.0, 50_000.0),
            TokenRecord::new("edge", "EDGE", "Edge").with_market(200_000.0, 9_999.0),
            TokenRecord::new("hot", "HOT", "Hot").with_market(900_000.0, 75_000.0),
        ];
        let discovery = TokenDiscovery::new(
            ScriptedTokenSource::new(records),
            FilterCriteria::new(10_000.0, 100_000.0, 30_000_000.0),
            settings(2000, 2),
        );

        let outcome = discovery.run().await;

        assert_eq!(outcome.fetched, 5);
        let order: Vec<_> = outcome.ranked.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(order, vec!["hot", "mid"]);
        assert_eq!(outcome.stop, PaginationStop::EndOfCatalog { offset: 6 });
    }
}
