//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;

use vibes_core::storage::{RepositoryError, Result, VibeRepository};
use vibes_core::vibe::{is_vibe, sort_newest_first, Vibe};

/// In-memory storage backend for testing.
///
/// Counts every store call so tests can assert that validation happens
/// before the store is touched, and can be told to fail the next call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    vibes: Arc<RwLock<HashMap<String, Vibe>>>,
    calls: Arc<AtomicUsize>,
    next_failure: Arc<Mutex<Option<RepositoryError>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document as-is, bypassing the call counter.
    pub async fn seed(&self, vibe: Vibe) {
        self.vibes.write().await.insert(vibe.id.clone(), vibe);
    }

    /// Number of `VibeRepository` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes the next repository call fail with `err`.
    pub fn fail_next(&self, err: RepositoryError) {
        *self.next_failure.lock().unwrap() = Some(err);
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VibeRepository for InMemoryRepository {
    async fn create_vibe(&self, vibe: &Vibe) -> Result<()> {
        self.record_call()?;
        let mut vibes = self.vibes.write().await;
        if vibes.contains_key(&vibe.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Vibe",
                id: vibe.id.clone(),
            });
        }
        vibes.insert(vibe.id.clone(), vibe.clone());
        Ok(())
    }

    async fn delete_vibe(&self, id: &str) -> Result<()> {
        self.record_call()?;
        let mut vibes = self.vibes.write().await;
        if vibes.remove(id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Vibe",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_vibes(&self) -> Result<Vec<Vibe>> {
        self.record_call()?;
        let vibes = self.vibes.read().await;
        let mut listed: Vec<Vibe> = vibes.values().filter(|v| is_vibe(v)).cloned().collect();
        sort_newest_first(&mut listed);
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vibes_core::vibe::CreateVibeRequest;

    fn vibe_at(title: &str, hour: u32) -> Vibe {
        CreateVibeRequest::new(title)
            .into_vibe_at(Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let repo = InMemoryRepository::new();
        let vibe = vibe_at("Sunset Drive", 18);

        repo.create_vibe(&vibe).await.unwrap();

        assert_eq!(repo.list_vibes().await.unwrap(), vec![vibe]);
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let repo = InMemoryRepository::new();
        let vibe = vibe_at("Sunset Drive", 18);

        repo.create_vibe(&vibe).await.unwrap();
        let result = repo.create_vibe(&vibe).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.delete_vibe("missing").await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_and_skips_other_types() {
        let repo = InMemoryRepository::new();
        let t1 = vibe_at("t1", 9);
        let t2 = vibe_at("t2", 10);
        let t3 = vibe_at("t3", 11);
        let mut other = vibe_at("not a vibe", 12);
        other.doc_type = "note".to_string();

        for vibe in [&t2, &t1, &t3] {
            repo.create_vibe(vibe).await.unwrap();
        }
        repo.seed(other).await;

        let titles: Vec<String> = repo
            .list_vibes()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(titles, ["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let repo = InMemoryRepository::new();
        repo.fail_next(RepositoryError::backend("boom"));

        assert!(repo.list_vibes().await.is_err());
        assert!(repo.list_vibes().await.unwrap().is_empty());
        assert_eq!(repo.calls(), 2);
    }
}
