//! Shutter Query
//!
//! The cached query coordinator: one entry per cache key, an
//! Idle → Loading → Success/Error state machine, in-flight de-duplication,
//! prefix invalidation, and retention-window sweeping. Views subscribe to a
//! key and receive snapshots over a watch channel.

pub mod cache;
pub mod entry;
pub mod subscription;

pub use cache::QueryCache;
pub use entry::{EntrySnapshot, ErrorInfo, QueryStatus};
pub use subscription::QuerySubscription;
