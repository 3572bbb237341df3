//! List filters and their canonical query-string form.
//!
//! Filter state lives in the URL so a filtered view is shareable by
//! copying the address. Unset means "no constraint" and is omitted from
//! the serialized form entirely; an empty string is a real value and is
//! kept. No validation happens here: any string is accepted, and a
//! malformed value simply matches nothing downstream.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const PARAM_ALBUM_ID: &str = "albumId";
pub const PARAM_QUERY: &str = "q";

/// Named filters understood by the photo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterName {
    AlbumId,
    Query,
}

impl FilterName {
    pub fn as_param(&self) -> &'static str {
        match self {
            FilterName::AlbumId => PARAM_ALBUM_ID,
            FilterName::Query => PARAM_QUERY,
        }
    }
}

/// The two optional string filters driving the photo list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub album_id: Option<String>,
    pub q: Option<String>,
}

impl FilterState {
    pub fn new(album_id: Option<String>, q: Option<String>) -> Self {
        Self { album_id, q }
    }

    pub fn get(&self, name: FilterName) -> Option<&str> {
        match name {
            FilterName::AlbumId => self.album_id.as_deref(),
            FilterName::Query => self.q.as_deref(),
        }
    }

    /// Set or clear a filter. `None` removes the parameter from the
    /// serialized form, it does not write an empty string.
    pub fn set(&mut self, name: FilterName, value: Option<String>) {
        match name {
            FilterName::AlbumId => self.album_id = value,
            FilterName::Query => self.q = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.album_id.is_none() && self.q.is_none()
    }

    /// Canonical query-string fragment: `""` when nothing is set,
    /// otherwise `?albumId=…&q=…` in that fixed order, percent-encoded.
    pub fn to_query_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(album_id) = &self.album_id {
            serializer.append_pair(PARAM_ALBUM_ID, album_id);
        }
        if let Some(q) = &self.q {
            serializer.append_pair(PARAM_QUERY, q);
        }
        format!("?{}", serializer.finish())
    }

    /// Inverse of [`to_query_string`](Self::to_query_string). Accepts the
    /// fragment with or without the leading `?`; unknown parameters are
    /// ignored. Parsing the serialized form reproduces the same state.
    pub fn parse(query: &str) -> Self {
        let raw = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                PARAM_ALBUM_ID => state.album_id = Some(value.into_owned()),
                PARAM_QUERY => state.q = Some(value.into_owned()),
                _ => {}
            }
        }
        state
    }
}
