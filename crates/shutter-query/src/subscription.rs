//! Subscription handles.

use crate::cache::CacheInner;
use crate::entry::EntrySnapshot;
use shutter_core::keys::QueryKey;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// A live subscription to one cache key. Dropping it releases the
/// subscriber reference and starts the entry's retention clock; a request
/// already in flight keeps running and its result is still cached.
pub struct QuerySubscription {
    key: QueryKey,
    inner: Arc<CacheInner>,
    rx: watch::Receiver<EntrySnapshot>,
}

impl QuerySubscription {
    pub(crate) fn new(
        key: QueryKey,
        inner: Arc<CacheInner>,
        rx: watch::Receiver<EntrySnapshot>,
    ) -> Self {
        Self { key, inner, rx }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// The latest snapshot for this key.
    pub fn snapshot(&self) -> EntrySnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next state transition.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until the entry leaves `Loading` (or `Idle`) and return the
    /// settled snapshot.
    pub async fn settled(&mut self) -> EntrySnapshot {
        loop {
            let snapshot = self.rx.borrow_and_update().clone();
            if snapshot.is_settled() {
                return snapshot;
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}

impl Drop for QuerySubscription {
    fn drop(&mut self) {
        let mut entries = self.inner.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(&self.key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                entry.released_at = Some(Instant::now());
            }
        }
    }
}
