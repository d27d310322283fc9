//! Cosmos DB repository implementation.
//!
//! Implements `VibeRepository` from `vibes_core::storage` on top of the
//! Cosmos DB REST API.

use async_trait::async_trait;
use reqwest::{header, Method, StatusCode};
use serde::Deserialize;
use serde_json::json;

use vibes_core::storage::{RepositoryError, Result, VibeRepository};
use vibes_core::vibe::{sort_newest_first, Vibe, VIBE_DOC_TYPE};

use super::client::{CosmosClient, Provisioned};
use super::error::map_error_response;
use crate::config::CosmosConfig;
use crate::error::StartupError;

/// The only query this repository issues. Ordering is applied after all
/// pages are read, since the gateway cannot serve a cross-partition ORDER BY.
pub const LIST_VIBES_QUERY: &str = "SELECT * FROM c WHERE c.type = @type";

const CONTINUATION_HEADER: &str = "x-ms-continuation";

/// One page of query results.
#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(rename = "Documents", default)]
    documents: Vec<Vibe>,
}

/// Cosmos DB-based repository for one container.
#[derive(Debug, Clone)]
pub struct CosmosRepository {
    client: CosmosClient,
    database: String,
    container: String,
}

impl CosmosRepository {
    /// Creates a repository over an existing client without provisioning.
    pub fn new(
        client: CosmosClient,
        database: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            client,
            database: database.into(),
            container: container.into(),
        }
    }

    /// Connects to the account and ensures the database and container exist.
    ///
    /// One attempt only: any failure is returned as a startup error.
    pub async fn connect(config: &CosmosConfig) -> std::result::Result<Self, StartupError> {
        let client = CosmosClient::new(config)?;

        tracing::debug!(endpoint = %client.endpoint(), "Probing Cosmos DB account");
        client.list_databases().await?;

        let database = client
            .ensure_database(&config.database, config.throughput)
            .await?;
        tracing::debug!(
            database = %config.database,
            created = database == Provisioned::Created,
            "Database ready"
        );

        let container = client
            .ensure_container(&config.database, &config.container, config.throughput)
            .await?;
        tracing::debug!(
            container = %config.container,
            created = container == Provisioned::Created,
            "Container ready"
        );

        Ok(Self::new(client, &config.database, &config.container))
    }

    /// Get the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the container name.
    pub fn container(&self) -> &str {
        &self.container
    }

    fn docs_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    fn partition_key_header(id: &str) -> String {
        json!([id]).to_string()
    }
}

#[async_trait]
impl VibeRepository for CosmosRepository {
    async fn create_vibe(&self, vibe: &Vibe) -> Result<()> {
        let link = self.docs_link();
        let request = self
            .client
            .request(Method::POST, &format!("/{}/docs", link), "docs", &link)
            .header(
                "x-ms-documentdb-partitionkey",
                Self::partition_key_header(&vibe.id),
            )
            .json(vibe);

        tracing::debug!(id = %vibe.id, "Creating vibe document");
        let response = self.client.send(request).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(map_error_response(response, "Vibe", vibe.id.clone()).await)
        }
    }

    async fn delete_vibe(&self, id: &str) -> Result<()> {
        let link = format!("{}/docs/{}", self.docs_link(), id);
        let request = self
            .client
            .request(Method::DELETE, &format!("/{}", link), "docs", &link)
            .header("x-ms-documentdb-partitionkey", Self::partition_key_header(id));

        tracing::debug!(id = %id, "Deleting vibe document");
        let response = self.client.send(request).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(map_error_response(response, "Vibe", id).await)
        }
    }

    async fn list_vibes(&self) -> Result<Vec<Vibe>> {
        let link = self.docs_link();
        let body = json!({
            "query": LIST_VIBES_QUERY,
            "parameters": [{ "name": "@type", "value": VIBE_DOC_TYPE }]
        });

        let mut vibes = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let mut request = self
                .client
                .request(Method::POST, &format!("/{}/docs", link), "docs", &link)
                .header(header::CONTENT_TYPE, "application/query+json")
                .header("x-ms-documentdb-isquery", "True")
                .header("x-ms-documentdb-query-enablecrosspartition", "True")
                .body(body.to_string());
            if let Some(token) = &continuation {
                request = request.header(CONTINUATION_HEADER, token.as_str());
            }

            let response = self.client.send(request).await?;
            if response.status() != StatusCode::OK {
                return Err(map_error_response(response, "Vibe", link.clone()).await);
            }

            continuation = response
                .headers()
                .get(CONTINUATION_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            let page: QueryPage = response
                .json()
                .await
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
            vibes.extend(page.documents);

            if continuation.is_none() {
                break;
            }
        }

        tracing::debug!(count = vibes.len(), "Listed vibes");
        sort_newest_first(&mut vibes);
        Ok(vibes)
    }
}
