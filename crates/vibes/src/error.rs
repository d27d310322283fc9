//! Application error types.

use std::io;

use thiserror::Error;
use vibes_core::storage::RepositoryError;

/// Conditions that end the process before the menu starts.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("COSMOS_KEY not found in environment variables")]
    MissingCredential,

    #[error("COSMOS_KEY is not a valid base64 key: {0}")]
    InvalidCredential(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("{0}")]
    ConnectionFailure(RepositoryError),
}

/// Errors that end an interactive session.
///
/// Store failures never end up here; they are reported to the operator and
/// the menu continues.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Interrupted by operator")]
    Interrupted,

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl From<RepositoryError> for StartupError {
    fn from(err: RepositoryError) -> Self {
        StartupError::ConnectionFailure(err)
    }
}

impl From<dialoguer::Error> for SessionError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io_err) => io_err.into(),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            SessionError::Interrupted
        } else {
            SessionError::Prompt(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_io_error_becomes_interrupted() {
        let err = io::Error::new(io::ErrorKind::Interrupted, "read interrupted");
        assert!(matches!(SessionError::from(err), SessionError::Interrupted));
    }

    #[test]
    fn test_other_io_error_becomes_prompt_error() {
        let err = io::Error::new(io::ErrorKind::NotConnected, "not a terminal");
        let session_err = SessionError::from(err);
        assert_eq!(session_err.to_string(), "Prompt failed: not a terminal");
    }

    #[test]
    fn test_connection_failure_display_is_transparent() {
        let err = StartupError::ConnectionFailure(RepositoryError::ConnectionFailed(
            "connection refused".to_string(),
        ));
        assert_eq!(err.to_string(), "Connection failed: connection refused");
    }
}
