//! Input types for vibe creation.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Vibe, DEFAULT_CATEGORY};

/// Payload for creating a new vibe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVibeRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateVibeRequest {
    /// Create a new request with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The category that will be stored. A missing or blank category
    /// becomes [`DEFAULT_CATEGORY`].
    pub fn effective_category(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Convert into a vibe stamped with the current instant.
    pub fn into_vibe(self) -> Vibe {
        self.into_vibe_at(Utc::now())
    }

    /// Convert into a vibe stamped with the given instant.
    pub fn into_vibe_at(self, at: DateTime<Utc>) -> Vibe {
        let category = self.effective_category().to_string();
        Vibe::new_at(self.title, self.description, category, at)
    }
}
