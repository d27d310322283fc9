use std::{fmt, time::Duration};

use clap::{builder::BoolishValueParser, Parser};

use crate::error::StartupError;

/// Vibes Manager - manage your vibes in Azure Cosmos DB
///
/// Every flag can also be set through the environment or a `.env` file in
/// the working directory.
#[derive(Parser, Debug)]
#[command(name = "vibes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Cosmos DB account endpoint
    #[arg(long, env = "COSMOS_ENDPOINT", default_value = "https://localhost:8081")]
    pub endpoint: String,

    /// Cosmos DB account key (base64)
    #[arg(long, env = "COSMOS_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Database holding the vibes container
    #[arg(long, env = "COSMOS_DATABASE_NAME", default_value = "vibes")]
    pub database: String,

    /// Container holding vibe documents
    #[arg(long, env = "COSMOS_CONTAINER_NAME", default_value = "items")]
    pub container: String,

    /// Accept invalid TLS certificates (local emulator only)
    #[arg(long, env = "DISABLE_SSL_VERIFICATION", value_parser = BoolishValueParser::new())]
    pub disable_ssl_verification: bool,

    /// Throughput (RU/s) requested when the database or container is created
    #[arg(long, env = "COSMOS_THROUGHPUT", default_value = "400")]
    pub throughput: u32,

    /// Connect and request timeout in seconds
    #[arg(long, env = "COSMOS_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Application configuration.
///
/// Logging verbosity is read straight from [`Cli`], since the subscriber is
/// installed before the configuration is validated.
#[derive(Debug, Clone)]
pub struct Config {
    pub cosmos: CosmosConfig,
}

/// Connection settings for the Cosmos DB account.
#[derive(Clone)]
pub struct CosmosConfig {
    /// Account endpoint without a trailing slash.
    pub endpoint: String,
    /// Base64 account key.
    pub key: String,
    pub database: String,
    pub container: String,
    pub disable_ssl_verification: bool,
    /// Throughput used when provisioning the database and container.
    pub throughput: u32,
    pub timeout: Duration,
}

impl fmt::Debug for CosmosConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .field("database", &self.database)
            .field("container", &self.container)
            .field("disable_ssl_verification", &self.disable_ssl_verification)
            .field("throughput", &self.throughput)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Validate parsed arguments into a configuration.
    ///
    /// A missing or blank key is fatal.
    pub fn from_cli(cli: Cli) -> Result<Self, StartupError> {
        let key = cli
            .key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(StartupError::MissingCredential)?;

        Ok(Self {
            cosmos: CosmosConfig {
                endpoint: cli.endpoint.trim().trim_end_matches('/').to_string(),
                key,
                database: cli.database,
                container: cli.container,
                disable_ssl_verification: cli.disable_ssl_verification,
                throughput: cli.throughput,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
        })
    }
}
