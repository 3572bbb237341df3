//! Shutter API client
//!
//! Thin HTTP layer over the remote gallery API. Queries return parsed
//! bodies; transport and HTTP failures map onto the shared error taxonomy.

pub mod client;
pub mod config;

pub use client::ApiClient;
pub use config::ApiConfig;
