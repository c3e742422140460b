//! In-memory page source with simulated network latency.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use shelf_core::config::DEFAULT_LATENCY_MS;
use shelf_core::{Error, PageKey, PageResult, PageSource, Result};
use shelf_utils::pagination::slice_page;
use tracing::{trace, warn};

/// Serves pages by slicing a shared row list after a fixed delay.
///
/// The first `failures` resolutions report [`Error::SourceUnavailable`] so the retry
/// path can be exercised without a flaky network.
pub struct SimulatedSource<R> {
    rows: Arc<Vec<R>>,
    latency: Duration,
    failures_left: AtomicUsize,
}

impl<R> SimulatedSource<R> {
    pub fn new(rows: Arc<Vec<R>>) -> Self {
        Self::with_latency(rows, Duration::from_millis(DEFAULT_LATENCY_MS))
    }

    pub fn with_latency(rows: Arc<Vec<R>>, latency: Duration) -> Self {
        Self {
            rows,
            latency,
            failures_left: AtomicUsize::new(0),
        }
    }

    pub fn with_failures(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::Relaxed);
        self
    }
}

#[async_trait]
impl<R: Clone + Send + Sync + 'static> PageSource for SimulatedSource<R> {
    type Row = R;

    async fn fetch_page(&self, key: PageKey) -> Result<PageResult<R>> {
        if key.page_size == 0 {
            return Err(Error::InvalidPageSize { size: 0 });
        }

        tokio::time::sleep(self.latency).await;

        let failing = self
            .failures_left
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            warn!(?key, "simulated page resolution failed");
            return Err(Error::unavailable("simulated network failure"));
        }

        trace!(?key, total_rows = self.rows.len(), "slicing simulated page");
        Ok(slice_page(&self.rows, key))
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    fn source(total: u32) -> SimulatedSource<u32> {
        SimulatedSource::new(Arc::new((0..total).collect()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_pages_arrive_after_latency() {
        let source = source(25);
        let started = Instant::now();

        let page = source.fetch_page(PageKey::new(2, 10)).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(page.rows, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.page_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_index_past_the_end_is_empty() {
        let page = source(25).fetch_page(PageKey::new(2, 50)).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.page_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_failures_then_recovery() {
        let source = source(25).with_failures(1);

        let err = source.fetch_page(PageKey::new(0, 10)).await.unwrap_err();
        assert_eq!(err, Error::unavailable("simulated network failure"));
        assert!(err.is_retryable());

        let page = source.fetch_page(PageKey::new(0, 10)).await.unwrap();
        assert_eq!(page.rows.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_page_size_is_rejected() {
        let err = source(25).fetch_page(PageKey::new(0, 0)).await.unwrap_err();
        assert_eq!(err, Error::InvalidPageSize { size: 0 });
    }
}
