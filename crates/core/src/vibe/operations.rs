use super::error::VibeError;
use super::types::{Vibe, VIBE_DOC_TYPE};

/// Validates a title entered by the operator, returning it trimmed.
pub fn validate_title(title: &str) -> Result<String, VibeError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(VibeError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Returns true when the document carries the vibe discriminator.
pub fn is_vibe(vibe: &Vibe) -> bool {
    vibe.doc_type == VIBE_DOC_TYPE
}

/// Sorts vibes by `created_at`, newest first.
///
/// Comparison is on the stored text, matching how the document store orders
/// string fields. Stored timestamps are fixed width, so this is chronological.
/// The sort is stable: vibes with equal timestamps keep their relative order.
pub fn sort_newest_first(vibes: &mut [Vibe]) {
    vibes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
