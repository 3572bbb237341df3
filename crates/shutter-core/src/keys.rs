//! Cache keys for the query coordinator.
//!
//! A key is an ordered tuple: the resource name followed by the filter
//! values that parameterize the request, each of which may be unset.
//! Two keys are equal iff every component is equal, unset included.
//! Invalidation works on key prefixes: the `(photos)` prefix matches
//! every filtered list and every photo detail key.

use crate::filters::FilterState;
use crate::ids::PhotoId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const RESOURCE_PHOTOS: &str = "photos";
pub const RESOURCE_ALBUMS: &str = "albums";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    components: Vec<Option<String>>,
}

impl QueryKey {
    /// A bare resource key, also usable as an invalidation prefix.
    pub fn resource(name: &str) -> Self {
        Self {
            components: vec![Some(name.to_string())],
        }
    }

    /// Key for the filtered photo list: `(photos, albumId, q)`.
    pub fn photos(filters: &FilterState) -> Self {
        Self {
            components: vec![
                Some(RESOURCE_PHOTOS.to_string()),
                filters.album_id.clone(),
                filters.q.clone(),
            ],
        }
    }

    /// Key for a single photo detail: `(photos, id)`.
    pub fn photo(id: &PhotoId) -> Self {
        Self {
            components: vec![
                Some(RESOURCE_PHOTOS.to_string()),
                Some(id.as_str().to_string()),
            ],
        }
    }

    /// Key for the album list: `(albums)`.
    pub fn albums() -> Self {
        Self::resource(RESOURCE_ALBUMS)
    }

    pub fn components(&self) -> &[Option<String>] {
        &self.components
    }

    /// True when every component of `prefix` equals the corresponding
    /// component of this key. Every key matches its own prefix.
    pub fn matches_prefix(&self, prefix: &QueryKey) -> bool {
        prefix.components.len() <= self.components.len()
            && prefix
                .components
                .iter()
                .zip(&self.components)
                .all(|(p, c)| p == c)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .components
            .iter()
            .map(|c| c.as_deref().unwrap_or("-"))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
