//! URL-backed filter store.
//!
//! The canonical representation of the photo list's filters is the query
//! string of the current location, which makes a filtered view shareable
//! by copying the URL. Setting a filter updates the observable location
//! synchronously and notifies watchers.

use shutter_core::filters::{FilterName, FilterState};
use tokio::sync::watch;

pub const PHOTO_LIST_PATH: &str = "/";

/// Holds the photo list route's filter state and its URL form.
pub struct UrlFilterStore {
    path: String,
    tx: watch::Sender<FilterState>,
    // Keeps the channel open with zero external watchers.
    _rx: watch::Receiver<FilterState>,
}

impl Default for UrlFilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlFilterStore {
    pub fn new() -> Self {
        Self::with_state(PHOTO_LIST_PATH, FilterState::default())
    }

    pub fn with_state(path: &str, state: FilterState) -> Self {
        let (tx, rx) = watch::channel(state);
        Self {
            path: path.to_string(),
            tx,
            _rx: rx,
        }
    }

    /// Restore a store from a pasted URL or path-with-query fragment.
    pub fn from_url(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };
        let path = if path.is_empty() { PHOTO_LIST_PATH } else { path };
        Self::with_state(path, FilterState::parse(query))
    }

    pub fn get(&self, name: FilterName) -> Option<String> {
        self.tx.borrow().get(name).map(String::from)
    }

    pub fn state(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    /// Set or clear a filter. `None` removes the parameter from the URL
    /// entirely. Watchers are notified before this returns.
    pub fn set(&self, name: FilterName, value: Option<String>) {
        self.tx.send_modify(|state| state.set(name, value));
    }

    /// The observable location: path plus canonical query string.
    pub fn href(&self) -> String {
        format!("{}{}", self.path, self.tx.borrow().to_query_string())
    }

    /// Watch filter changes; each change carries the full new state.
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }
}
