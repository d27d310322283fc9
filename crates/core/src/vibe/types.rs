use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminator stored in the `type` field of every vibe document.
pub const VIBE_DOC_TYPE: &str = "vibe";

/// Category used when none is supplied at creation.
pub const DEFAULT_CATEGORY: &str = "general";

/// A vibe document as persisted in the backing store.
///
/// Timestamps are kept as the stored text so a record read back from the
/// store is identical to the one written, and so documents written by other
/// tools with unexpected date formats still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vibe {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(rename = "type", default = "default_doc_type")]
    pub doc_type: String,
}

fn default_doc_type() -> String {
    VIBE_DOC_TYPE.to_string()
}

impl Vibe {
    /// Creates a new vibe with a fresh id, stamped with the current instant.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::new_at(title, description, category, Utc::now())
    }

    /// Creates a new vibe with a fresh id, stamped with the given instant.
    pub fn new_at(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        let stamp = format_timestamp(at);
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            created_at: stamp.clone(),
            updated_at: stamp,
            doc_type: default_doc_type(),
        }
    }

    /// Parsed creation instant, if the stored text is a recognizable timestamp.
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Parsed last-update instant, if the stored text is a recognizable timestamp.
    pub fn updated_instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Formats an instant the way vibe timestamps are stored.
///
/// The output is fixed width (microsecond precision, `Z` suffix) so that
/// lexical order matches chronological order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored timestamp.
///
/// Accepts RFC 3339 text with an offset or `Z`, and offset-less ISO-8601
/// text (read as UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_new_vibe_sets_discriminator_and_equal_timestamps() {
        let vibe = Vibe::new_at("Sunset Drive", "chill", "calm", instant());

        assert_eq!(vibe.doc_type, VIBE_DOC_TYPE);
        assert_eq!(vibe.created_at, vibe.updated_at);
        assert_eq!(vibe.created_at, "2024-06-15T10:30:00.000000Z");
        assert!(Uuid::parse_str(&vibe.id).is_ok());
    }

    #[test]
    fn test_new_vibes_get_distinct_ids() {
        let a = Vibe::new("a", "", "general");
        let b = Vibe::new("a", "", "general");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_updated_at_parses_back_to_original_instant() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::microseconds(123_456);
        let vibe = Vibe::new_at("t", "", "general", at);

        assert_eq!(vibe.updated_instant(), Some(at));
        assert_eq!(vibe.created_instant(), Some(at));
    }

    #[test]
    fn test_parse_timestamp_accepts_naive_iso() {
        let parsed = parse_timestamp("2024-06-15T10:30:00.123456").unwrap();
        assert_eq!(
            parsed,
            instant() + chrono::Duration::microseconds(123_456)
        );
    }

    #[test]
    fn test_parse_timestamp_accepts_offset() {
        let parsed = parse_timestamp("2024-06-15T12:30:00+02:00").unwrap();
        assert_eq!(parsed, instant());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    #[test]
    fn test_serializes_type_field() {
        let vibe = Vibe::new_at("t", "d", "c", instant());
        let json = serde_json::to_value(&vibe).unwrap();

        assert_eq!(json["type"], "vibe");
        assert!(json.get("doc_type").is_none());
    }

    #[test]
    fn test_deserialize_ignores_service_metadata_and_fills_missing_fields() {
        let json = r#"{
            "id": "abc",
            "title": "Only a title",
            "type": "vibe",
            "_rid": "xyz==",
            "_etag": "\"0000\"",
            "_ts": 1718447400
        }"#;

        let vibe: Vibe = serde_json::from_str(json).unwrap();

        assert_eq!(vibe.id, "abc");
        assert_eq!(vibe.title, "Only a title");
        assert_eq!(vibe.description, "");
        assert_eq!(vibe.category, "");
        assert_eq!(vibe.created_at, "");
    }
}
