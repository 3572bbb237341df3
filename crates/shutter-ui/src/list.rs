//! Photo list view binding.
//!
//! Subscribes to the coordinator for the key derived from the current
//! filters and reduces the entry snapshot to what a list surface renders:
//! loading, empty, populated, or failed. Switching filters subscribes to
//! the new key; the old key's entry stays cached, so switching back is
//! instant.

use shutter_api::ApiClient;
use shutter_core::filters::FilterState;
use shutter_core::keys::QueryKey;
use shutter_core::models::Photo;
use shutter_query::{EntrySnapshot, QueryCache, QueryStatus, QuerySubscription};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ListViewState {
    Loading,
    Empty,
    Populated(Vec<Photo>),
    Failed(String),
}

pub struct PhotoListView {
    cache: QueryCache,
    api: Arc<ApiClient>,
    subscription: Option<QuerySubscription>,
}

impl PhotoListView {
    pub fn new(cache: QueryCache, api: Arc<ApiClient>) -> Self {
        Self {
            cache,
            api,
            subscription: None,
        }
    }

    /// Bind to the key for `filters`, subscribing if the active key
    /// changed. Returns the state to render right now (typically
    /// `Loading` on a fresh key).
    pub fn bind(&mut self, filters: &FilterState) -> ListViewState {
        let key = QueryKey::photos(filters);
        let already_bound = self
            .subscription
            .as_ref()
            .is_some_and(|sub| *sub.key() == key);

        if !already_bound {
            debug!(%key, "Binding photo list to key");
            let api = Arc::clone(&self.api);
            let filters = filters.clone();
            let subscription = self.cache.subscribe(key, move || {
                let api = Arc::clone(&api);
                let filters = filters.clone();
                async move {
                    let photos = api.list_photos(&filters).await?;
                    Ok(serde_json::to_value(photos)?)
                }
            });
            self.subscription = Some(subscription);
        }

        self.current()
    }

    /// The state for the currently bound key.
    pub fn current(&self) -> ListViewState {
        match &self.subscription {
            None => ListViewState::Loading,
            Some(sub) => reduce(&sub.snapshot()),
        }
    }

    /// Wait until the bound entry settles and return the resulting state.
    pub async fn settled(&mut self) -> ListViewState {
        match &mut self.subscription {
            None => ListViewState::Loading,
            Some(sub) => reduce(&sub.settled().await),
        }
    }
}

fn reduce(snapshot: &EntrySnapshot) -> ListViewState {
    match snapshot.status {
        QueryStatus::Idle | QueryStatus::Loading => ListViewState::Loading,
        QueryStatus::Error => ListViewState::Failed(
            snapshot
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "unknown error".to_string()),
        ),
        QueryStatus::Success => match snapshot.decode::<Vec<Photo>>() {
            Ok(Some(photos)) if photos.is_empty() => ListViewState::Empty,
            Ok(Some(photos)) => ListViewState::Populated(photos),
            Ok(None) => ListViewState::Empty,
            Err(err) => ListViewState::Failed(err.to_string()),
        },
    }
}
