//! Cosmos DB error mapping.
//!
//! Maps transport failures and error responses to `RepositoryError` from
//! `vibes_core::storage`.

use serde::Deserialize;
use vibes_core::storage::{repository_error_from_status, RepositoryError};

/// Error body returned by the Cosmos DB REST API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map a reqwest transport error to RepositoryError.
pub fn map_transport_error(err: reqwest::Error) -> RepositoryError {
    if err.is_connect() || err.is_timeout() {
        RepositoryError::ConnectionFailed(err.to_string())
    } else {
        RepositoryError::Backend {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

/// Extracts a readable message from an error response body.
///
/// Cosmos messages embed diagnostics after the first line; only the first
/// line is kept. Non-JSON bodies are returned trimmed.
pub fn error_message(body: &str) -> String {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            code: Some(code), ..
        }) => code,
        _ => body.to_string(),
    };
    let first_line = message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    if first_line.is_empty() {
        "Unknown error".to_string()
    } else {
        first_line.to_string()
    }
}

/// Map a failed response to RepositoryError, consuming its body.
pub async fn map_error_response(
    response: reqwest::Response,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    repository_error_from_status(status, entity_type, id, error_message(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"code":"Conflict","message":"Entity with the specified id already exists in the system.\r\nActivityId: 1234, Microsoft.Azure.Documents.Common/2.14.0"}"#;
        assert_eq!(
            error_message(body),
            "Entity with the specified id already exists in the system."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_code() {
        assert_eq!(error_message(r#"{"code":"Forbidden"}"#), "Forbidden");
    }

    #[test]
    fn test_error_message_from_plain_text() {
        assert_eq!(error_message("  Service Unavailable \n"), "Service Unavailable");
    }

    #[test]
    fn test_error_message_for_empty_body() {
        assert_eq!(error_message(""), "Unknown error");
    }
}
