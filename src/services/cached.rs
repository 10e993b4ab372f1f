use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::records::GradeRecord;
use crate::services::record_source::RecordSource;

/// Reuses the records of an inner source for `ttl` after each fetch.
///
/// Failed fetches are not cached.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    slot: Mutex<Option<(Instant, Vec<GradeRecord>)>>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl<S: RecordSource> RecordSource for CachedSource<S> {
    async fn fetch(&self) -> Result<Vec<GradeRecord>> {
        let mut slot = self.slot.lock().await;

        if let Some((fetched_at, records)) = slot.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!(source = %self.inner.describe(), "Serving cached records");
                return Ok(records.clone());
            }
        }

        let records = self.inner.fetch().await?;
        *slot = Some((Instant::now(), records.clone()));
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("{} (cached {}s)", self.inner.describe(), self.ttl.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::scenario;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl RecordSource for CountingSource {
        async fn fetch(&self) -> Result<Vec<GradeRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("sheet unavailable");
            }
            Ok(scenario())
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let cached = CachedSource::new(CountingSource::new(false), Duration::from_secs(600));

        let first = cached.fetch().await.unwrap();
        let second = cached.fetch().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let cached = CachedSource::new(CountingSource::new(false), Duration::ZERO);

        cached.fetch().await.unwrap();
        cached.fetch().await.unwrap();

        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cached = CachedSource::new(CountingSource::new(true), Duration::from_secs(600));

        assert!(cached.fetch().await.is_err());
        assert!(cached.fetch().await.is_err());
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }
}
