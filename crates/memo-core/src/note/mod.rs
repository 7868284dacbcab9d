//! Notes and the derived-title convention.

pub mod store;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use store::NoteStore;

/// Title used when the first line of a note is blank.
pub const UNTITLED: &str = "Untitled";

/// Maximum number of characters kept from the first line.
pub const MAX_TITLE_CHARS: usize = 40;

/// A user-authored text record with a derived title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque identifier, immutable after creation
    pub id: String,

    /// First line of `content`, see [`extract_title`]
    pub title: String,

    /// Free-form text
    pub content: String,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,

    /// Last content change, milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl Note {
    /// Create an empty note stamped with `now`.
    pub fn new(now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: UNTITLED.to_string(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content, recomputing the title and `updated_at`.
    pub fn set_content(&mut self, content: impl Into<String>, now: i64) {
        self.content = content.into();
        self.title = extract_title(&self.content);
        self.updated_at = now;
    }

    /// Content flattened to one line, for list previews.
    pub fn preview(&self) -> String {
        self.content.replace("\r\n", " ").replace('\n', " ")
    }
}

/// Derive a title from the first line of `content`.
///
/// The line is trimmed and cut to [`MAX_TITLE_CHARS`] characters. Blank
/// lines give [`UNTITLED`]. Applying this to its own output returns the
/// same title.
pub fn extract_title(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let cut: String = first_line.trim().chars().take(MAX_TITLE_CHARS).collect();
    let title = cut.trim_end();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
