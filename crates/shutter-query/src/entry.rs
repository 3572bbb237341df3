//! Cache entry snapshots.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shutter_core::{Error, Result};
use std::sync::Arc;

/// Lifecycle of a cache entry. An entry is never frozen: it can re-enter
/// `Loading` indefinitely as long as it has subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Error details stored in an entry when a fetch is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
}

impl From<&Error> for ErrorInfo {
    fn from(err: &Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// What a subscriber sees of an entry at one point in time. Data is kept
/// across refetches so views can keep showing the previous result while a
/// fresh one loads.
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    pub status: QueryStatus,
    pub data: Option<Arc<Value>>,
    pub error: Option<ErrorInfo>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl EntrySnapshot {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
        }
    }

    /// Transition into `Loading`, retaining whatever data was there.
    pub fn into_loading(self) -> Self {
        Self {
            status: QueryStatus::Loading,
            error: None,
            ..self
        }
    }

    pub fn success(data: Arc<Value>) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
            fetched_at: Some(Utc::now()),
        }
    }

    /// Transition into `Error`, retaining prior data.
    pub fn into_error(self, info: ErrorInfo) -> Self {
        Self {
            status: QueryStatus::Error,
            error: Some(info),
            ..self
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.status, QueryStatus::Success | QueryStatus::Error)
    }

    /// Decode the cached payload into a typed value. `None` when no data
    /// has arrived yet.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.data {
            None => Ok(None),
            Some(value) => {
                let decoded = serde_json::from_value(value.as_ref().clone())?;
                Ok(Some(decoded))
            }
        }
    }
}
