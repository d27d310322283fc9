//! In-memory storage backend for testing.
//!
//! Stores vibes in a `HashMap` wrapped in `Arc<RwLock<_>>`. Nothing is
//! persisted; the data goes away with the repository.

mod repository;

pub use repository::InMemoryRepository;
