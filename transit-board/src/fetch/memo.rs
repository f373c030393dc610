//! Per-invocation memoization of timetable fetches.
//!
//! Several stop-name patterns (or several filter combinations) can resolve to
//! the same stop within one invocation. Successful results are remembered for
//! a short time so each distinct query reaches the network once. Failures are
//! never memoized.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::api::FetchError;
use crate::domain::StopTimetable;

use super::{TimetableFetcher, TimetableQuery};

/// Configuration for the memo.
#[derive(Debug, Clone)]
pub struct MemoConfig {
    /// How long a fetched timetable is reused.
    pub ttl: Duration,

    /// Maximum number of remembered timetables.
    pub max_capacity: u64,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

/// Fetcher that remembers successful results of an inner fetcher.
pub struct MemoizedFetcher<F> {
    inner: F,
    memo: MokaCache<TimetableQuery, Arc<StopTimetable>>,
}

impl<F: TimetableFetcher> MemoizedFetcher<F> {
    /// Wrap a fetcher.
    pub fn new(inner: F, config: &MemoConfig) -> Self {
        let memo = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, memo }
    }
}

#[async_trait]
impl<F: TimetableFetcher> TimetableFetcher for MemoizedFetcher<F> {
    async fn fetch(&self, query: &TimetableQuery) -> Result<StopTimetable, FetchError> {
        if let Some(hit) = self.memo.get(query).await {
            return Ok((*hit).clone());
        }

        let timetable = self.inner.fetch(query).await?;
        self.memo
            .insert(query.clone(), Arc::new(timetable.clone()))
            .await;

        Ok(timetable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopCode;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; fails for stop "0000".
    struct CountingFetcher {
        calls: AtomicUsize,
        seen: Mutex<Vec<TimetableQuery>>,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TimetableFetcher for CountingFetcher {
        async fn fetch(&self, query: &TimetableQuery) -> Result<StopTimetable, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(query.clone());

            if query.stop_code.as_str() == "0000" {
                return Err(FetchError::NotFound("stop 0000".into()));
            }

            Ok(StopTimetable {
                stop_code: query.stop_code.clone(),
                stop_name: "STOP".into(),
                generation_time: String::new(),
                lines: vec![],
            })
        }
    }

    fn query(code: &str) -> TimetableQuery {
        TimetableQuery::stop(StopCode::parse(code).unwrap())
    }

    #[tokio::test]
    async fn repeated_query_fetches_once() {
        let fetcher = MemoizedFetcher::new(CountingFetcher::new(), &MemoConfig::default());

        let a = fetcher.fetch(&query("0012")).await.unwrap();
        let b = fetcher.fetch(&query("0012")).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_filters_are_different_queries() {
        let fetcher = MemoizedFetcher::new(CountingFetcher::new(), &MemoConfig::default());

        let mut filtered = query("0012");
        filtered.line_number = Some("94".into());

        fetcher.fetch(&query("0012")).await.unwrap();
        fetcher.fetch(&filtered).await.unwrap();

        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_memoized() {
        let fetcher = MemoizedFetcher::new(CountingFetcher::new(), &MemoConfig::default());

        assert!(fetcher.fetch(&query("0000")).await.is_err());
        assert!(fetcher.fetch(&query("0000")).await.is_err());

        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(fetcher.inner.seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn default_config() {
        let config = MemoConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 10_000);
    }
}
