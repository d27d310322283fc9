use thiserror::Error;

/// Errors raised while validating vibe input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VibeError {
    #[error("Title cannot be empty")]
    EmptyTitle,
}
