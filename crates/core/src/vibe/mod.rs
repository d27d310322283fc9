mod display;
mod error;
mod operations;
mod requests;
mod types;

pub use display::{
    format_created_display, format_created_short, format_vibe_details, format_vibes_table,
    picker_label, short_id, truncate_description, truncate_title, vibe_row, VibeRow,
    DESCRIPTION_MAX_CHARS, SHORT_ID_CHARS, TITLE_PICKER_MAX_CHARS,
};
pub use error::VibeError;
pub use operations::{is_vibe, sort_newest_first, validate_title};
pub use requests::CreateVibeRequest;
pub use types::{format_timestamp, parse_timestamp, Vibe, DEFAULT_CATEGORY, VIBE_DOC_TYPE};
