//! Shutter UI bindings
//!
//! The URL-backed filter store, the photo list view, and the photo detail
//! navigator. These bind the query coordinator to whatever surface renders
//! it (the CLI here; any frontend in principle).

pub mod list;
pub mod navigator;
pub mod store;

pub use list::{ListViewState, PhotoListView};
pub use navigator::PhotoNavigator;
pub use store::UrlFilterStore;
