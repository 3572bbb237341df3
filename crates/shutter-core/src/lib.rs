//! Shutter Core
//!
//! Core domain types, traits, and error handling for Shutter.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across all other crates.

pub mod error;
pub mod filters;
pub mod forms;
pub mod ids;
pub mod keys;
pub mod models;
pub mod notify;

pub use error::{Error, Result};
pub use ids::*;
