//! One interactive session, from an open store to its release.

use std::future::Future;
use std::process::ExitCode;

use vibes_core::storage::VibeRepository;

use crate::console::{Prompter, Reporter};
use crate::error::SessionError;
use crate::manager::VibesManager;
use crate::menu;

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Interrupted,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Finished => ExitCode::SUCCESS,
            Outcome::Interrupted => ExitCode::from(130),
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Runs the menu until it ends or `shutdown` resolves, then closes the store.
///
/// The store is closed on every path. A pending shutdown wins over a menu
/// step that is ready in the same poll.
pub async fn run<R, F>(
    manager: VibesManager<R>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Reporter,
    shutdown: F,
) -> Outcome
where
    R: VibeRepository,
    F: Future<Output = ()>,
{
    let session = tokio::select! {
        biased;
        _ = shutdown => None,
        result = menu::run(&manager, prompter, out) => Some(result),
    };

    let outcome = match session {
        Some(Ok(())) => Outcome::Finished,
        Some(Err(SessionError::Interrupted)) | None => Outcome::Interrupted,
        Some(Err(err)) => {
            tracing::error!(error = %err, "Session ended unexpectedly");
            out.error(&format!("An unexpected error occurred: {err}"));
            Outcome::Failed
        }
    };

    manager.close(out);
    if outcome == Outcome::Interrupted {
        out.plain("");
        out.success("Goodbye!");
    }
    outcome
}
