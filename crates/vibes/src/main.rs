mod config;
mod console;
mod error;
mod manager;
mod menu;
mod prelude;
mod session;
mod storage;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, Config};
use crate::console::{ConsoleReporter, DialoguerPrompter, Reporter};
use crate::manager::VibesManager;
use crate::session::Outcome;
use crate::storage::cosmos::CosmosRepository;

/// How long to wait for a prompt still blocked on the terminal at exit.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    // Prompts run on the blocking pool; dropping the runtime normally would
    // wait for one still reading the terminal.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let outcome = runtime.block_on(run(cli));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    Ok(outcome.exit_code())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "vibes=debug" } else { "vibes=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialize logging")
}

async fn run(cli: Cli) -> Outcome {
    let mut out = ConsoleReporter;
    console::show_welcome(&mut out, &cli.endpoint);

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            out.error(&err.to_string());
            out.warning("Set COSMOS_KEY in the environment or in a .env file");
            return Outcome::Failed;
        }
    };
    tracing::debug!(config = ?config, "Loaded configuration");

    let Ok(manager) = VibesManager::<CosmosRepository>::open(&config.cosmos, &mut out).await else {
        out.error("Failed to connect to Cosmos DB. Exiting.");
        return Outcome::Failed;
    };

    let mut prompter = DialoguerPrompter;
    session::run(manager, &mut prompter, &mut out, shutdown_signal()).await
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
