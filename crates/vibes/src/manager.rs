//! The record store façade.
//!
//! [`VibesManager`] turns each operation into exactly one repository call
//! and reports the outcome to the operator. Failures are reported here and
//! handed back to the caller; they never end the session.

use tracing::{debug, warn};

use vibes_core::storage::{RepositoryError, VibeRepository};
use vibes_core::vibe::{
    format_vibe_details, format_vibes_table, picker_label, CreateVibeRequest, Vibe,
};

use crate::config::CosmosConfig;
use crate::console::{Prompter, Reporter};
use crate::error::{SessionError, StartupError};
use crate::storage::cosmos::CosmosRepository;

const CANCEL_LABEL: &str = "cancel. Go back to main menu";

/// Owns the connection to the vibes collection for the whole session.
#[derive(Debug)]
pub struct VibesManager<R> {
    repo: R,
}

impl VibesManager<CosmosRepository> {
    /// Connects to Cosmos DB, creating the database and container if needed.
    ///
    /// Progress and failures are reported to `out`; the error is returned so
    /// the caller can end the process.
    pub async fn open(config: &CosmosConfig, out: &mut dyn Reporter) -> Result<Self, StartupError> {
        out.warning("Connecting to Cosmos DB...");

        match CosmosRepository::connect(config).await {
            Ok(repo) => {
                out.success("Successfully connected to Cosmos DB");
                out.info(&format!("Database: {}", repo.database()));
                out.info(&format!("Container: {}", repo.container()));
                Ok(Self::new(repo))
            }
            Err(err) => {
                warn!(error = %err, endpoint = %config.endpoint, "Failed to connect to Cosmos DB");
                report_connect_failure(&err, out);
                Err(err)
            }
        }
    }
}

fn report_connect_failure(err: &StartupError, out: &mut dyn Reporter) {
    match err {
        StartupError::ConnectionFailure(RepositoryError::Backend { message, status }) => {
            out.error(&format!("Cosmos DB HTTP Error: {message}"));
            out.error(&format!(
                "Status Code: {}",
                status.map_or_else(|| "N/A".to_string(), |code| code.to_string())
            ));
        }
        StartupError::ConnectionFailure(_) => {
            out.error(&err.to_string());
            out.warning("Make sure the Cosmos DB emulator is running");
        }
        _ => out.error(&err.to_string()),
    }
}

impl<R: VibeRepository> VibesManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Releases the connection.
    pub fn close(self, out: &mut dyn Reporter) {
        drop(self.repo);
        debug!("Store connection released");
        out.warning("Disconnected from Cosmos DB");
    }

    /// Stores a new vibe and returns its id.
    ///
    /// The title is expected to be validated by the caller.
    pub async fn create(
        &self,
        request: CreateVibeRequest,
        out: &mut dyn Reporter,
    ) -> Result<String, RepositoryError> {
        let vibe = request.into_vibe();
        debug!(id = %vibe.id, title = %vibe.title, "Creating vibe");

        match self.repo.create_vibe(&vibe).await {
            Ok(()) => {
                out.success(&format!("Added vibe: '{}'", vibe.title));
                out.info(&format!("ID: {}", vibe.id));
                Ok(vibe.id)
            }
            Err(err) => {
                log_unexpected("create", &err);
                match &err {
                    RepositoryError::AlreadyExists { .. } => {
                        out.error("Vibe with this ID already exists");
                    }
                    other => {
                        out.error(&format!("Failed to add vibe: {}", failure_message(other)));
                        if let Some(code) = other.status_code() {
                            out.error(&format!("Status Code: {code}"));
                        }
                    }
                }
                Err(err)
            }
        }
    }

    /// Deletes the vibe with the given id.
    pub async fn delete(&self, id: &str, out: &mut dyn Reporter) -> Result<(), RepositoryError> {
        debug!(id, "Deleting vibe");

        match self.repo.delete_vibe(id).await {
            Ok(()) => {
                out.success(&format!("Removed vibe with ID: {id}"));
                Ok(())
            }
            Err(err) => {
                log_unexpected("delete", &err);
                match &err {
                    RepositoryError::NotFound { .. } => {
                        out.error(&format!("Vibe not found with ID: {id}"));
                    }
                    other => {
                        out.error(&format!("Failed to remove vibe: {}", failure_message(other)));
                    }
                }
                Err(err)
            }
        }
    }

    /// Every stored vibe, newest first.
    pub async fn list(&self, out: &mut dyn Reporter) -> Result<Vec<Vibe>, RepositoryError> {
        match self.repo.list_vibes().await {
            Ok(vibes) => {
                debug!(count = vibes.len(), "Listed vibes");
                Ok(vibes)
            }
            Err(err) => {
                log_unexpected("list", &err);
                out.error(&format!("Failed to list vibes: {}", failure_message(&err)));
                Err(err)
            }
        }
    }

    /// Prints vibes as a table followed by the total.
    pub fn render(&self, vibes: &[Vibe], out: &mut dyn Reporter) {
        if vibes.is_empty() {
            out.warning(&format_vibes_table(vibes));
            return;
        }
        for line in format_vibes_table(vibes).lines() {
            out.plain(line);
        }
        out.plain("");
        out.info(&format!("Total vibes: {}", vibes.len()));
    }

    /// Lets the operator pick a vibe to remove.
    ///
    /// Returns `None` when the store is empty, the listing fails, or the
    /// operator cancels. Nothing is deleted here; the caller confirms first.
    pub async fn select_for_removal(
        &self,
        prompter: &mut dyn Prompter,
        out: &mut dyn Reporter,
    ) -> Result<Option<Vibe>, SessionError> {
        let Ok(mut vibes) = self.list(out).await else {
            return Ok(None);
        };
        if vibes.is_empty() {
            out.warning("No vibes available to remove");
            return Ok(None);
        }

        out.heading(&format!("Select a vibe to remove ({} total):", vibes.len()));

        let mut items: Vec<String> = vibes
            .iter()
            .enumerate()
            .map(|(i, vibe)| picker_label(i + 1, vibe))
            .collect();
        items.push(CANCEL_LABEL.to_string());
        let cancel = vibes.len();

        let choice = prompter
            .select("Enter the number of the vibe to remove", &items, cancel)
            .await?;
        if choice >= cancel {
            return Ok(None);
        }

        let selected = vibes.swap_remove(choice);
        out.heading("Selected vibe details:");
        for (label, value) in format_vibe_details(&selected) {
            out.detail(label, &value);
        }
        Ok(Some(selected))
    }
}

/// The store's own message for backend errors, the full error otherwise.
fn failure_message(err: &RepositoryError) -> String {
    match err {
        RepositoryError::Backend { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn log_unexpected(operation: &'static str, err: &RepositoryError) {
    if !err.is_expected() {
        warn!(operation, error = %err, status = ?err.status_code(), "Store operation failed");
    }
}
