//! Shared helpers for Shutter integration tests.

pub mod helpers;
