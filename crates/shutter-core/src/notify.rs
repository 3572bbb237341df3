//! User-visible notifications.
//!
//! Every mutation produces exactly one transient notification, success or
//! failure. Delivery is local (terminal, buffer), so the port is sync;
//! implementations that forward somewhere remote can hand off to a channel.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that emits through the tracing pipeline. Useful as a default
/// when no interactive surface is attached.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(message = %notification.message, "notification"),
            NotificationKind::Error => error!(message = %notification.message, "notification"),
        }
    }
}

/// Notifier that buffers everything it receives. Used by tests to assert
/// the one-notification-per-mutation rule.
#[derive(Debug, Default)]
pub struct BufferingNotifier {
    received: std::sync::Mutex<Vec<Notification>>,
}

impl BufferingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut self.received.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for BufferingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().unwrap().push(notification);
    }
}
