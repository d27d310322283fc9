//! Cosmos DB REST client setup and provisioning (Imperative Shell).

use std::fmt;

use chrono::Utc;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde_json::json;
use vibes_core::storage::Result;

use super::auth;
use super::error::{map_error_response, map_transport_error};
use crate::config::CosmosConfig;
use crate::error::StartupError;

/// REST API version sent with every request.
pub const API_VERSION: &str = "2018-12-31";

/// Partition key path of the vibes container.
pub const PARTITION_KEY_PATH: &str = "/id";

/// Outcome of an idempotent "create if not exists" call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    Existing,
}

/// Signed HTTP client for a Cosmos DB account.
#[derive(Clone)]
pub struct CosmosClient {
    http: reqwest::Client,
    endpoint: String,
    signer: auth::Signer,
}

impl fmt::Debug for CosmosClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl CosmosClient {
    /// Creates a client for the configured account.
    pub fn new(config: &CosmosConfig) -> std::result::Result<Self, StartupError> {
        let key = auth::decode_key(&config.key)
            .map_err(|e| StartupError::InvalidCredential(e.to_string()))?;
        let signer =
            auth::signer(&key).map_err(|e| StartupError::InvalidCredential(e.to_string()))?;

        if config.disable_ssl_verification {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.disable_ssl_verification)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| StartupError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            signer,
        })
    }

    /// Get the endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds a signed request.
    ///
    /// `path` is appended to the endpoint; `resource_type` and
    /// `resource_link` are the values the signature covers.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        resource_type: &str,
        resource_link: &str,
    ) -> RequestBuilder {
        let date = auth::format_request_date(Utc::now());
        let token = auth::authorization_token(
            &self.signer,
            method.as_str(),
            resource_type,
            resource_link,
            &date,
        );

        self.http
            .request(method, format!("{}{}", self.endpoint, path))
            .header(header::AUTHORIZATION, token)
            .header(header::ACCEPT, "application/json")
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION)
    }

    /// Sends a request, mapping transport failures.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(map_transport_error)
    }

    /// Lists databases to verify the endpoint and credentials.
    pub async fn list_databases(&self) -> Result<()> {
        let response = self
            .send(self.request(Method::GET, "/dbs", "dbs", ""))
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(map_error_response(response, "Account", self.endpoint.clone()).await)
        }
    }

    /// Creates the database unless it already exists.
    pub async fn ensure_database(&self, database: &str, throughput: u32) -> Result<Provisioned> {
        let request = self
            .request(Method::POST, "/dbs", "dbs", "")
            .header("x-ms-offer-throughput", throughput.to_string())
            .json(&json!({ "id": database }));

        let response = self.send(request).await?;
        provisioned(response, "Database", database).await
    }

    /// Creates the container, partitioned on [`PARTITION_KEY_PATH`], unless
    /// it already exists.
    pub async fn ensure_container(
        &self,
        database: &str,
        container: &str,
        throughput: u32,
    ) -> Result<Provisioned> {
        let db_link = format!("dbs/{}", database);
        let request = self
            .request(Method::POST, &format!("/{}/colls", db_link), "colls", &db_link)
            .header("x-ms-offer-throughput", throughput.to_string())
            .json(&json!({
                "id": container,
                "partitionKey": { "paths": [PARTITION_KEY_PATH], "kind": "Hash" }
            }));

        let response = self.send(request).await?;
        provisioned(response, "Container", container).await
    }
}

async fn provisioned(
    response: Response,
    entity_type: &'static str,
    id: &str,
) -> Result<Provisioned> {
    match response.status() {
        StatusCode::CONFLICT => Ok(Provisioned::Existing),
        status if status.is_success() => Ok(Provisioned::Created),
        _ => Err(map_error_response(response, entity_type, id).await),
    }
}

