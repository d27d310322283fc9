//! Pure functions for mapping store response statuses to repository errors.
//!
//! This module follows the Functional Core pattern: the HTTP-speaking shell
//! hands over a status code and message, and gets back the error kind.

use super::RepositoryError;

/// Maps a failed store response to a [`RepositoryError`].
///
/// - 404 -> `NotFound`
/// - 409 -> `AlreadyExists`
/// - anything else -> `Backend`, carrying the status and message
///
/// # Examples
///
/// ```
/// use vibes_core::storage::{repository_error_from_status, RepositoryError};
///
/// let error = repository_error_from_status(404, "Vibe", "abc-123", "Resource Not Found");
/// assert_eq!(
///     error,
///     RepositoryError::NotFound { entity_type: "Vibe", id: "abc-123".to_string() }
/// );
/// ```
pub fn repository_error_from_status(
    status: u16,
    entity_type: &'static str,
    id: impl Into<String>,
    message: impl Into<String>,
) -> RepositoryError {
    match status {
        404 => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },
        409 => RepositoryError::AlreadyExists {
            entity_type,
            id: id.into(),
        },
        _ => RepositoryError::Backend {
            message: message.into(),
            status: Some(status),
        },
    }
}
