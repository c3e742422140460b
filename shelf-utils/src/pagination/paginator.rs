//! Pagination state machine over a [`PageRequestCache`].
//!
//! Every navigation operation re-derives the current [`PageKey`] and issues a lookup.
//! Cache hits are shown immediately; misses are resolved on a background task that
//! reports back through [`Paginator::next_completion`]. A completion for a key that is
//! no longer current still fills the cache but never replaces the displayed page.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use shelf_core::{Error, PageKey, PageResult, PageSource, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::DEFAULT_PAGE_SIZE;
use super::cache::{PageOutcome, PageRequestCache};
use super::view::{PageStatus, TableView};

/// Current page index and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    pub fn key(&self) -> PageKey {
        PageKey::new(self.page_index, self.page_size)
    }
}

/// Total page count as far as the paginator knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCount {
    /// No page has been shown yet.
    Unknown,
    Known(usize),
}

impl PageCount {
    /// Sentinel form: `-1` while unknown.
    pub fn as_sentinel(self) -> i64 {
        match self {
            PageCount::Unknown => -1,
            PageCount::Known(count) => count as i64,
        }
    }

    pub fn known(self) -> Option<usize> {
        match self {
            PageCount::Unknown => None,
            PageCount::Known(count) => Some(count),
        }
    }
}

/// Behavior switches for a [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorOptions {
    /// Keep the last shown page visible while the next one resolves.
    pub keep_previous_while_pending: bool,
    /// Move the page index back to the last page when a result shows it is out of range.
    pub clamp_page_index: bool,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            keep_previous_while_pending: true,
            clamp_page_index: false,
        }
    }
}

/// A finished resolution delivered back to the paginator.
#[derive(Debug)]
pub struct PageCompletion<R> {
    pub key: PageKey,
    pub outcome: PageOutcome<R>,
}

/// Whether an applied completion was for the key being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// Owns pagination state, the request cache, and the displayed page.
///
/// Dropping the paginator unmounts it: waiter tasks are aborted and the cache goes
/// with it.
pub struct Paginator<S: PageSource> {
    state: PaginationState,
    options: PaginatorOptions,
    source: Arc<S>,
    cache: Arc<PageRequestCache<S::Row>>,
    displayed: Option<(PageKey, Arc<PageResult<S::Row>>)>,
    failure: Option<(PageKey, Error)>,
    in_flight: HashMap<PageKey, JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<PageCompletion<S::Row>>,
    completions_rx: mpsc::UnboundedReceiver<PageCompletion<S::Row>>,
}

impl<S: PageSource + 'static> Paginator<S> {
    /// Mount a paginator at `(0, DEFAULT_PAGE_SIZE)` and issue the first lookup.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn mount(source: Arc<S>, options: PaginatorOptions) -> Self {
        Self::start(source, options, PaginationState::default())
    }

    /// Mount a paginator at an explicit initial state.
    ///
    /// A zero page size is rejected with [`Error::InvalidPageSize`] and nothing is issued.
    pub fn mount_with_state(
        source: Arc<S>,
        options: PaginatorOptions,
        initial: PaginationState,
    ) -> Result<Self> {
        if initial.page_size == 0 {
            return Err(Error::InvalidPageSize { size: 0 });
        }
        Ok(Self::start(source, options, initial))
    }

    fn start(source: Arc<S>, options: PaginatorOptions, state: PaginationState) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let mut paginator = Self {
            state,
            options,
            source,
            cache: Arc::new(PageRequestCache::new()),
            displayed: None,
            failure: None,
            in_flight: HashMap::new(),
            completions_tx,
            completions_rx,
        };
        paginator.issue();
        paginator
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn cache(&self) -> &PageRequestCache<S::Row> {
        &self.cache
    }

    /// Page count of the displayed result, `Unknown` before the first one.
    pub fn page_count(&self) -> PageCount {
        match &self.displayed {
            Some((_, result)) => PageCount::Known(result.page_count),
            None => PageCount::Unknown,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.page_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        match self.page_count() {
            PageCount::Known(count) => self.state.page_index + 1 < count,
            PageCount::Unknown => false,
        }
    }

    /// Whether a resolution for the current key is outstanding.
    pub fn is_loading(&self) -> bool {
        let key = self.state.key();
        self.cache.peek(key).is_none() && !matches!(&self.failure, Some((failed, _)) if *failed == key)
    }

    pub fn first_page(&mut self) {
        self.state.page_index = 0;
        self.issue();
    }

    pub fn previous_page(&mut self) {
        self.state.page_index = self.state.page_index.saturating_sub(1);
        self.issue();
    }

    /// Advance one page. Callers disable this when [`Self::can_go_next`] is false.
    pub fn next_page(&mut self) {
        self.state.page_index = self.state.page_index.saturating_add(1);
        self.issue();
    }

    /// Jump to the last known page; a no-op while the page count is unknown.
    pub fn last_page(&mut self) {
        match self.page_count() {
            PageCount::Known(count) => self.set_page_index(count as i64 - 1),
            PageCount::Unknown => debug!("last page requested before page count is known"),
        }
    }

    /// Set the page index; negative values clamp to 0, there is no upper clamp.
    pub fn set_page_index(&mut self, page_index: i64) {
        self.state.page_index = usize::try_from(page_index).unwrap_or(0);
        self.issue();
    }

    /// Change rows per page. The page index is left as is, even past the new end.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { size: page_size });
        }
        self.state.page_size = page_size;
        self.issue();
        Ok(())
    }

    /// Issue the current key again after a failed resolution.
    pub fn retry(&mut self) {
        let key = self.state.key();
        if matches!(&self.failure, Some((failed, _)) if *failed == key) {
            self.failure = None;
        }
        self.issue();
    }

    /// Wait for the next finished resolution.
    pub async fn next_completion(&mut self) -> Option<PageCompletion<S::Row>> {
        self.completions_rx.recv().await
    }

    /// Fold a finished resolution into the paginator.
    pub fn apply(&mut self, completion: PageCompletion<S::Row>) -> Applied {
        let PageCompletion { key, outcome } = completion;
        self.in_flight.remove(&key);

        if key != self.state.key() {
            debug!(?key, current = ?self.state.key(), "stale page resolution, display unchanged");
            return Applied::Stale;
        }

        match outcome {
            Ok(result) => self.show(key, result),
            Err(source) => {
                warn!(?key, %source, "current page failed to resolve");
                self.failure = Some((key, source));
            }
        }
        Applied::Current
    }

    /// Drain completions until the current key is resolved or has failed.
    pub async fn settle(&mut self) {
        while self.is_loading() {
            let Some(completion) = self.completions_rx.recv().await else {
                return;
            };
            self.apply(completion);
        }
    }

    /// Snapshot of what should be rendered now.
    pub fn view(&self) -> TableView<S::Row> {
        let key = self.state.key();
        let failure = match &self.failure {
            Some((failed, error)) if *failed == key => Some(error.clone()),
            _ => None,
        };

        let (rows, status) = match (&self.displayed, failure) {
            (Some((shown, result)), None) if *shown == key => {
                (Some(Arc::clone(result)), PageStatus::Ready)
            }
            (Some((_, result)), failure) if self.options.keep_previous_while_pending => {
                let status = match failure {
                    Some(error) => PageStatus::Failed(error),
                    None => PageStatus::Placeholder,
                };
                (Some(Arc::clone(result)), status)
            }
            (_, Some(error)) => (None, PageStatus::Failed(error)),
            (_, None) => (None, PageStatus::Loading),
        };

        TableView::new(rows, self.state, self.page_count(), status)
    }

    fn issue(&mut self) {
        let key = self.state.key();

        if let Some(result) = self.cache.get(key) {
            debug!(?key, "page served from cache");
            self.show(key, result);
            return;
        }

        // A new or joined resolution supersedes an earlier failure of this key.
        if matches!(&self.failure, Some((failed, _)) if *failed == key) {
            self.failure = None;
        }

        if self.in_flight.contains_key(&key) {
            return;
        }

        debug!(?key, "requesting page");
        let cache = Arc::clone(&self.cache);
        let source = Arc::clone(&self.source);
        let completions = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let outcome = cache.resolve(key, &source).await;
            let _ = completions.send(PageCompletion { key, outcome });
        });
        self.in_flight.insert(key, task);
    }

    fn show(&mut self, key: PageKey, result: Arc<PageResult<S::Row>>) {
        let page_count = result.page_count;
        self.displayed = Some((key, result));
        self.failure = None;

        if self.options.clamp_page_index && self.state.page_index >= page_count {
            let clamped = page_count.saturating_sub(1);
            if clamped != self.state.page_index {
                debug!(from = self.state.page_index, to = clamped, "clamping page index");
                self.state.page_index = clamped;
                self.issue();
            }
        }
    }
}

impl<S: PageSource> Drop for Paginator<S> {
    fn drop(&mut self) {
        for (_, task) in self.in_flight.drain() {
            task.abort();
        }
    }
}
