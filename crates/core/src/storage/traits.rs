use async_trait::async_trait;

use crate::vibe::Vibe;

use super::Result;

/// Repository for vibe documents.
///
/// Each method maps to exactly one backing-store operation.
#[async_trait]
pub trait VibeRepository: Send + Sync {
    /// Persists a new vibe. Fails with `AlreadyExists` if the id is taken.
    async fn create_vibe(&self, vibe: &Vibe) -> Result<()>;

    /// Deletes a vibe by id. Fails with `NotFound` if there is no such vibe.
    async fn delete_vibe(&self, id: &str) -> Result<()>;

    /// Returns every vibe, newest first.
    async fn list_vibes(&self) -> Result<Vec<Vibe>>;
}
