use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("{}", backend_display(.message, .status))]
    Backend {
        message: String,
        status: Option<u16>,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn backend_display(message: &str, status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("Backend error ({code}): {message}"),
        None => format!("Backend error: {message}"),
    }
}

impl RepositoryError {
    /// Builds a backend error without a status code.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            status: None,
        }
    }

    /// Expected outcomes are reported to the operator but never logged as
    /// failures.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::AlreadyExists { .. })
    }

    /// Status code reported by the store, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::AlreadyExists { .. } => Some(409),
            Self::Backend { status, .. } => *status,
            Self::ConnectionFailed(_) | Self::Serialization(_) => None,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Vibe",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Vibe not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Vibe",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Vibe already exists: abc-123");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_repository_error_backend_display_with_status() {
        let error = RepositoryError::Backend {
            message: "Request rate is large".to_string(),
            status: Some(429),
        };
        assert_eq!(error.to_string(), "Backend error (429): Request rate is large");
    }

    #[test]
    fn test_repository_error_backend_display_without_status() {
        let error = RepositoryError::backend("socket closed");
        assert_eq!(error.to_string(), "Backend error: socket closed");
    }

    #[test]
    fn test_expected_errors() {
        assert!(RepositoryError::NotFound {
            entity_type: "Vibe",
            id: "x".to_string()
        }
        .is_expected());
        assert!(RepositoryError::AlreadyExists {
            entity_type: "Vibe",
            id: "x".to_string()
        }
        .is_expected());
        assert!(!RepositoryError::backend("boom").is_expected());
        assert!(!RepositoryError::ConnectionFailed("down".to_string()).is_expected());
    }

    #[test]
    fn test_status_code() {
        let backend = RepositoryError::Backend {
            message: "boom".to_string(),
            status: Some(503),
        };
        assert_eq!(backend.status_code(), Some(503));
        assert_eq!(RepositoryError::backend("boom").status_code(), None);
        assert_eq!(
            RepositoryError::Serialization("bad json".to_string()).status_code(),
            None
        );
    }
}
