//! Per-key page request cache with in-flight deduplication.
//!
//! Resolved pages are kept for the lifetime of the cache. Misses are resolved
//! through a shared future so concurrent callers for the same [`PageKey`] await
//! one source call. A failed resolution is handed to every waiter and then
//! dropped from the map, so the next request for that key tries again.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::future::Shared;
use parking_lot::Mutex;
use shelf_core::{PageKey, PageResult, PageSource, Result};
use tracing::{debug, trace, warn};

/// Outcome of one page resolution, shared by every waiter.
pub type PageOutcome<R> = Result<Arc<PageResult<R>>>;

type PageFetchFut<R> = Shared<Pin<Box<dyn Future<Output = PageOutcome<R>> + Send>>>;

/// Counters for cache activity.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Requests answered from a resolved entry.
    pub hits: AtomicU64,
    /// Requests that started a new source call.
    pub misses: AtomicU64,
    /// Requests that joined a resolution already in flight.
    pub joins: AtomicU64,
    /// Resolutions stored as entries.
    pub inserts: AtomicU64,
    /// Resolutions that failed and were discarded.
    pub failures: AtomicU64,
}

impl CacheStats {
    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub joins: u64,
    pub inserts: u64,
    pub failures: u64,
}

/// Options for a non-blocking [`PageRequestCache::lookup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Serve the most recently resolved page (any key) while `key` is unresolved.
    pub keep_previous_while_pending: bool,
}

/// What a caller should display for a key right now.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup<R> {
    /// The key is resolved.
    Ready(Arc<PageResult<R>>),
    /// The key is unresolved; this is the last page resolved for another key.
    Previous(Arc<PageResult<R>>),
    /// The key is unresolved and nothing may be shown in its place.
    Pending,
}

enum CacheEntry<R> {
    Pending { fetch_id: u64, fetch: PageFetchFut<R> },
    Resolved(Arc<PageResult<R>>),
}

/// Keyed store of page results with shared in-flight resolutions.
pub struct PageRequestCache<R> {
    entries: Mutex<HashMap<PageKey, CacheEntry<R>>>,
    last_resolved: Mutex<Option<Arc<PageResult<R>>>>,
    next_fetch_id: AtomicU64,
    stats: CacheStats,
}

impl<R> Default for PageRequestCache<R> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            last_resolved: Mutex::new(None),
            next_fetch_id: AtomicU64::new(0),
            stats: CacheStats::default(),
        }
    }
}

impl<R: Clone + Send + Sync + 'static> PageRequestCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `key`, calling `source` only if no entry exists.
    ///
    /// A resolved entry is returned without touching the source. A pending entry is
    /// joined. Failures are returned to every waiter and are not stored.
    pub async fn resolve<S>(&self, key: PageKey, source: &Arc<S>) -> PageOutcome<R>
    where
        S: PageSource<Row = R> + 'static,
    {
        let (fetch_id, fetch) = {
            let mut entries = self.entries.lock();
            match entries.get(&key) {
                Some(CacheEntry::Resolved(result)) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    trace!(?key, "page cache hit");
                    return Ok(Arc::clone(result));
                }
                Some(CacheEntry::Pending { fetch_id, fetch }) => {
                    self.stats.joins.fetch_add(1, Ordering::Relaxed);
                    trace!(?key, fetch_id, "joining in-flight page resolution");
                    (*fetch_id, fetch.clone())
                }
                None => {
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                    let fetch_id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                    let fetch = make_fetch_future(Arc::clone(source), key);
                    debug!(?key, fetch_id, "page cache miss, resolving from source");
                    entries.insert(
                        key,
                        CacheEntry::Pending {
                            fetch_id,
                            fetch: fetch.clone(),
                        },
                    );
                    (fetch_id, fetch)
                }
            }
        };

        let outcome = fetch.await;
        self.finish_fetch(key, fetch_id, &outcome);
        outcome
    }

    /// Report what to display for `key` without starting a resolution.
    pub fn lookup(&self, key: PageKey, options: LookupOptions) -> PageLookup<R> {
        if let Some(result) = self.peek(key) {
            return PageLookup::Ready(result);
        }

        if options.keep_previous_while_pending
            && let Some(previous) = self.last_resolved.lock().as_ref()
        {
            return PageLookup::Previous(Arc::clone(previous));
        }

        PageLookup::Pending
    }

    /// Like [`Self::peek`], but a resolved entry counts as a cache hit.
    pub fn get(&self, key: PageKey) -> Option<Arc<PageResult<R>>> {
        let result = self.peek(key)?;
        self.stats.hits.fetch_add(1, Ordering::Relaxed);
        Some(result)
    }

    /// Return the resolved entry for `key`, if any.
    pub fn peek(&self, key: PageKey) -> Option<Arc<PageResult<R>>> {
        match self.entries.lock().get(&key) {
            Some(CacheEntry::Resolved(result)) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    /// Whether a resolution for `key` is in flight.
    pub fn is_pending(&self, key: PageKey) -> bool {
        matches!(
            self.entries.lock().get(&key),
            Some(CacheEntry::Pending { .. })
        )
    }

    /// Number of entries, resolved or pending.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    /// Settle the entry for `key` if it still belongs to `fetch_id`.
    ///
    /// Every waiter calls this; only the first one to see its own pending entry acts.
    fn finish_fetch(&self, key: PageKey, fetch_id: u64, outcome: &PageOutcome<R>) {
        let mut entries = self.entries.lock();
        let is_current = matches!(
            entries.get(&key),
            Some(CacheEntry::Pending { fetch_id: pending, .. }) if *pending == fetch_id
        );
        if !is_current {
            return;
        }

        match outcome {
            Ok(result) => {
                entries.insert(key, CacheEntry::Resolved(Arc::clone(result)));
                *self.last_resolved.lock() = Some(Arc::clone(result));
                self.stats.inserts.fetch_add(1, Ordering::Relaxed);
                debug!(?key, rows = result.rows.len(), page_count = result.page_count, "page resolved");
            }
            Err(source) => {
                entries.remove(&key);
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                warn!(?key, %source, "page resolution failed, entry left open for retry");
            }
        }
    }
}

fn make_fetch_future<S>(source: Arc<S>, key: PageKey) -> PageFetchFut<S::Row>
where
    S: PageSource + 'static,
{
    async move { source.fetch_page(key).await.map(Arc::new) }
        .boxed()
        .shared()
}
