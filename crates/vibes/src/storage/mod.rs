//! Storage backend implementations.
//!
//! Concrete implementations of [`vibes_core::storage::VibeRepository`]:
//!
//! - `cosmos`: Azure Cosmos DB over its REST API, used by the binary.
//! - `inmemory`: a `HashMap` behind a `tokio` lock, used by the façade and
//!   menu tests.

pub mod cosmos;

#[cfg(test)]
pub mod inmemory;
