//! Shutter Mutations
//!
//! Create/delete operations against the gallery API. Each mutation
//! validates client-side first, runs its remote call(s), invalidates the
//! cache prefixes it affects on success, and emits exactly one
//! user-visible notification either way.

pub mod pipeline;

pub use pipeline::MutationPipeline;
