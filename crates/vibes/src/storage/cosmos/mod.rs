//! Cosmos DB storage backend.
//!
//! Talks to the Cosmos DB SQL API over its REST interface using `reqwest`,
//! signing every request with the account master key.

mod auth;
mod client;
mod error;
mod repository;


pub use repository::CosmosRepository;
