//! The query cache coordinator.
//!
//! One entry per [`QueryKey`], shared by every subscriber of that key.
//! The map is guarded by a standard mutex held only for map operations;
//! fetches run as spawned tasks and report back by locking again. At most
//! one request is in flight per key. Out-of-order completions follow a
//! last-response-wins policy.

use crate::entry::{EntrySnapshot, ErrorInfo, QueryStatus};
use crate::subscription::QuerySubscription;
use futures::future::BoxFuture;
use serde_json::Value;
use shutter_core::Result;
use shutter_core::keys::QueryKey;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

pub const DEFAULT_RETENTION: Duration = Duration::from_secs(5 * 60);

type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<Value>> + Send + Sync>;

pub(crate) struct Entry {
    tx: watch::Sender<EntrySnapshot>,
    // Kept so the channel stays open while the entry exists.
    _rx: watch::Receiver<EntrySnapshot>,
    fetcher: Option<Fetcher>,
    pub(crate) subscribers: usize,
    in_flight: bool,
    stale: bool,
    pub(crate) released_at: Option<Instant>,
}

impl Entry {
    fn new() -> Self {
        let (tx, rx) = watch::channel(EntrySnapshot::idle());
        Self {
            tx,
            _rx: rx,
            fetcher: None,
            subscribers: 0,
            in_flight: false,
            stale: false,
            released_at: None,
        }
    }

    fn snapshot(&self) -> EntrySnapshot {
        self.tx.borrow().clone()
    }
}

pub(crate) struct CacheInner {
    pub(crate) entries: Mutex<HashMap<QueryKey, Entry>>,
    retention: Duration,
}

/// The cached query coordinator. Cloning is cheap and clones share the
/// same cache; create one at application start and inject it where needed.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Override how long an unsubscribed entry survives before
    /// [`sweep`](Self::sweep) removes it.
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(HashMap::new()),
                retention,
            }),
        }
    }

    /// Subscribe to a key, fetching when there is nothing usable cached.
    ///
    /// A `Success` or `Error` entry is returned as-is with no silent
    /// refetch. A missing, idle, or stale entry transitions to `Loading`
    /// and the fetch runs once; concurrent subscribers arriving while the
    /// request is in flight attach to it instead of issuing their own.
    pub fn subscribe<F, Fut>(&self, key: QueryKey, fetch: F) -> QuerySubscription
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let fetcher: Fetcher = Arc::new(move || Box::pin(fetch()));

        let mut entries = self.inner.entries.lock().unwrap();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.fetcher = Some(Arc::clone(&fetcher));
        entry.subscribers += 1;
        entry.released_at = None;
        let rx = entry.tx.subscribe();

        let needs_fetch =
            !entry.in_flight && (entry.snapshot().status == QueryStatus::Idle || entry.stale);
        if needs_fetch {
            self.start_fetch(entry, &key);
        }
        drop(entries);

        QuerySubscription::new(key, Arc::clone(&self.inner), rx)
    }

    /// Current snapshot for a key, without subscribing.
    pub fn peek(&self, key: &QueryKey) -> Option<EntrySnapshot> {
        self.inner
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(Entry::snapshot)
    }

    /// Re-run the stored fetch for a key (user retry after `Error`).
    /// No-op when the key is unknown or a request is already in flight.
    pub fn refetch(&self, key: &QueryKey) {
        let mut entries = self.inner.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(key) {
            if !entry.in_flight && entry.fetcher.is_some() {
                self.start_fetch(entry, key);
            }
        }
    }

    /// Invalidate every entry whose key matches the prefix. Entries with
    /// live subscribers go straight back to `Loading` and refetch; the
    /// rest are marked stale for their next subscription. An entry whose
    /// request is currently in flight is marked stale and refetches when
    /// that request settles, keeping the one-in-flight-per-key invariant.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        let mut entries = self.inner.entries.lock().unwrap();
        let mut refetched = 0usize;
        let mut marked = 0usize;
        // Collect first: starting a fetch mutates entries while iterating.
        let matching: Vec<QueryKey> = entries
            .keys()
            .filter(|key| key.matches_prefix(prefix))
            .cloned()
            .collect();
        for key in matching {
            let Some(entry) = entries.get_mut(&key) else {
                continue;
            };
            if entry.in_flight {
                entry.stale = true;
                marked += 1;
            } else if entry.subscribers > 0 && entry.fetcher.is_some() {
                self.start_fetch(entry, &key);
                refetched += 1;
            } else {
                entry.stale = true;
                marked += 1;
            }
        }
        debug!(%prefix, refetched, marked, "Invalidated cache prefix");
    }

    /// Drop entries that have had no subscribers for longer than the
    /// retention window. In-flight entries are kept so a fire-and-forget
    /// result still lands in the cache.
    pub fn sweep(&self) {
        let retention = self.inner.retention;
        let now = Instant::now();
        let mut entries = self.inner.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| {
            entry.subscribers > 0
                || entry.in_flight
                || entry
                    .released_at
                    .is_none_or(|released| now.duration_since(released) < retention)
        });
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Swept cache entries");
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transition an entry to `Loading` and spawn its fetch.
    /// Caller holds the entries lock.
    fn start_fetch(&self, entry: &mut Entry, key: &QueryKey) {
        let Some(fetcher) = entry.fetcher.clone() else {
            return;
        };
        entry.in_flight = true;
        entry.stale = false;
        let loading = entry.snapshot().into_loading();
        entry.tx.send_replace(loading);

        debug!(%key, "Fetch started");
        let inner = Arc::clone(&self.inner);
        let key = key.clone();
        tokio::spawn(async move {
            let result = fetcher().await;
            apply_result(&inner, &key, result);
        });
    }
}

/// Store a settled fetch result. Runs on the spawned fetch task; the entry
/// may have lost all its subscribers in the meantime, in which case the
/// result is still stored (requests are never aborted mid-flight).
fn apply_result(inner: &Arc<CacheInner>, key: &QueryKey, result: Result<Value>) {
    let mut entries = inner.entries.lock().unwrap();
    let Some(entry) = entries.get_mut(key) else {
        // Swept while in flight; nowhere to store the result.
        warn!(%key, "Fetch settled for a discarded entry");
        return;
    };
    entry.in_flight = false;

    let snapshot = match result {
        Ok(value) => {
            debug!(%key, "Fetch succeeded");
            EntrySnapshot::success(Arc::new(value))
        }
        Err(err) => {
            warn!(%key, error = %err, "Fetch failed");
            entry.snapshot().into_error(ErrorInfo::from(&err))
        }
    };
    entry.tx.send_replace(snapshot);

    // An invalidation arrived while this request was in flight: the result
    // just stored may predate the mutation, so fetch again for live
    // subscribers.
    if entry.stale && entry.subscribers > 0 {
        if let Some(fetcher) = entry.fetcher.clone() {
            entry.in_flight = true;
            entry.stale = false;
            let loading = entry.snapshot().into_loading();
            entry.tx.send_replace(loading);

            let inner = Arc::clone(inner);
            let key = key.clone();
            tokio::spawn(async move {
                let result = fetcher().await;
                apply_result(&inner, &key, result);
            });
        }
    }
}
