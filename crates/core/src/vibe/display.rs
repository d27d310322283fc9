//! Pure display formatting for vibes.
//!
//! Nothing here touches stored data: every function derives a display
//! string and falls back to the raw stored text when it cannot be parsed.

use super::types::{parse_timestamp, Vibe, DEFAULT_CATEGORY};

/// Longest description shown in the list table before truncation.
pub const DESCRIPTION_MAX_CHARS: usize = 50;

/// Longest title shown in the removal picker.
pub const TITLE_PICKER_MAX_CHARS: usize = 30;

/// Number of leading id characters shown in the list table.
pub const SHORT_ID_CHARS: usize = 8;

const ELLIPSIS: &str = "...";
const COLUMN_GAP: &str = "  ";

/// Truncates a description to [`DESCRIPTION_MAX_CHARS`], ending it with
/// an ellipsis when it was cut.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_MAX_CHARS {
        return description.to_string();
    }
    let keep = DESCRIPTION_MAX_CHARS - ELLIPSIS.len();
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Cuts a title to [`TITLE_PICKER_MAX_CHARS`]. Empty titles read "Untitled".
pub fn truncate_title(title: &str) -> String {
    if title.is_empty() {
        return "Untitled".to_string();
    }
    title.chars().take(TITLE_PICKER_MAX_CHARS).collect()
}

/// The leading [`SHORT_ID_CHARS`] characters of an id.
pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_CHARS).collect()
}

/// Formats a stored timestamp as `YYYY-MM-DD HH:MM`, or returns it verbatim
/// if it does not parse.
pub fn format_created_display(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Formats a stored timestamp as `MM/DD/YY` for the removal picker.
///
/// Unparseable text is cut to its first ten characters (usually the date
/// part); an empty value reads "Unknown".
pub fn format_created_short(raw: &str) -> String {
    if raw.is_empty() {
        return "Unknown".to_string();
    }
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%m/%d/%y").to_string(),
        None => raw.chars().take(10).collect(),
    }
}

/// Picker entry: `"{n}. {title} [{category}] ({created})"`, `n` starting at 1.
pub fn picker_label(number: usize, vibe: &Vibe) -> String {
    let category = if vibe.category.is_empty() {
        DEFAULT_CATEGORY
    } else {
        vibe.category.as_str()
    };
    format!(
        "{}. {} [{}] ({})",
        number,
        truncate_title(&vibe.title),
        category,
        format_created_short(&vibe.created_at)
    )
}

/// A vibe prepared for the list table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibeRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub created: String,
}

/// Builds the table row for a vibe.
pub fn vibe_row(vibe: &Vibe) -> VibeRow {
    VibeRow {
        id: short_id(&vibe.id),
        title: vibe.title.clone(),
        description: truncate_description(&vibe.description),
        category: vibe.category.clone(),
        created: format_created_display(&vibe.created_at),
    }
}

/// Renders vibes as an aligned plain-text table.
pub fn format_vibes_table(vibes: &[Vibe]) -> String {
    if vibes.is_empty() {
        return "No vibes found in the database".to_string();
    }

    let headers = ["ID", "Title", "Description", "Category", "Created"];
    let rows: Vec<[String; 5]> = vibes
        .iter()
        .map(vibe_row)
        .map(|row| [row.id, row.title, row.description, row.category, row.created])
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_cells(headers.iter().copied(), &widths));
    lines.push(join_cells(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in &rows {
        lines.push(join_cells(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn join_cells<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

/// Field/value pairs describing a single vibe in full.
pub fn format_vibe_details(vibe: &Vibe) -> Vec<(&'static str, String)> {
    let or_na = |value: &str| {
        if value.is_empty() {
            "N/A".to_string()
        } else {
            value.to_string()
        }
    };
    vec![
        ("Title:", or_na(&vibe.title)),
        ("Description:", or_na(&vibe.description)),
        ("Category:", or_na(&vibe.category)),
        ("ID:", or_na(&vibe.id)),
        ("Created:", or_na(&vibe.created_at)),
    ]
}
