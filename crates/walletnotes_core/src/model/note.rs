//! Wallet note domain model.
//!
//! # Responsibility
//! - Define the persisted note record tied to one wallet address.
//! - Provide creation/edit helpers that keep timestamp invariants.
//! - Parse comma-separated tag input.
//!
//! # Invariants
//! - `id` is assigned once and never changes.
//! - `title` and `content` are non-empty after trimming.
//! - `updated_at >= created_at`, and every edit strictly advances `updated_at`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque note identifier.
///
/// Stored as text so records written by older hosts (timestamp ids) still load.
pub type NoteId = String;

/// User-authored annotation tied to one wallet address.
///
/// Field names serialize in camelCase to keep the stored array layout
/// `id, address, title, content, createdAt, updatedAt, tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Free-form address, compared case-insensitively.
    pub address: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Order as entered; duplicates are kept.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Editable subset of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Validation failure for note writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyAddress,
    EmptyTitle,
    EmptyContent,
    DuplicateId(NoteId),
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder(NoteId),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "note address cannot be empty"),
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::DuplicateId(id) => write!(f, "duplicate note id: {id}"),
            Self::TimestampOrder(id) => {
                write!(f, "note {id} has updatedAt earlier than createdAt")
            }
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a note with a generated id and `created_at == updated_at == now`.
    ///
    /// Title and content are stored trimmed. Call [`Note::validate`] (or go
    /// through the store) before persisting.
    pub fn new(
        address: impl Into<String>,
        title: impl AsRef<str>,
        content: impl AsRef<str>,
        tags: Vec<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), address, title, content, tags)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: impl Into<NoteId>,
        address: impl Into<String>,
        title: impl AsRef<str>,
        content: impl AsRef<str>,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            address: address.into(),
            title: title.as_ref().trim().to_string(),
            content: content.as_ref().trim().to_string(),
            created_at: now,
            updated_at: now,
            tags,
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::TimestampOrder(self.id.clone()));
        }
        Ok(())
    }

    /// Overwrites title/content/tags and advances `updated_at`.
    ///
    /// `id`, `address` and `created_at` are left untouched.
    pub fn apply_patch(&mut self, patch: NotePatch) {
        self.title = patch.title.trim().to_string();
        self.content = patch.content.trim().to_string();
        self.tags = patch.tags;
        self.updated_at = next_update_stamp(self.updated_at);
    }

    /// Case-insensitive address comparison.
    pub fn address_matches(&self, address: &str) -> bool {
        self.address.to_lowercase() == address.to_lowercase()
    }
}

impl NotePatch {
    /// Validates the patch with the same title/content rules as a note.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// Splits comma-separated tag input.
///
/// Tokens are trimmed and empty ones dropped; order and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Renders tags back into editable form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

// Clock reads can repeat at coarse resolution; an edit must still move forward.
fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{join_tags, parse_tags, Note, NotePatch, NoteValidationError};

    #[test]
    fn parse_tags_trims_and_drops_empty_tokens() {
        assert_eq!(parse_tags("a, b ,, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_tags_keeps_duplicates_in_order() {
        assert_eq!(parse_tags("x,y, x"), vec!["x", "y", "x"]);
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn join_tags_round_trips_through_parse() {
        let tags = vec!["defi".to_string(), "cold storage".to_string()];
        assert_eq!(join_tags(&tags), "defi, cold storage");
        assert_eq!(parse_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn new_note_trims_fields_and_starts_with_equal_timestamps() {
        let note = Note::new("lum1abc", "  Check ", " body ", Vec::new());
        assert_eq!(note.title, "Check");
        assert_eq!(note.content, "body");
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.id.is_empty());
    }

    #[test]
    fn apply_patch_advances_updated_at_and_keeps_identity() {
        let mut note = Note::new("lum1abc", "Check", "body", Vec::new());
        let before = note.clone();
        note.apply_patch(NotePatch {
            title: "Check".to_string(),
            content: "updated".to_string(),
            tags: vec!["t".to_string()],
        });
        assert_eq!(note.id, before.id);
        assert_eq!(note.address, before.address);
        assert_eq!(note.created_at, before.created_at);
        assert!(note.updated_at > before.updated_at);
        assert_eq!(note.content, "updated");
    }

    #[test]
    fn validate_rejects_blank_title_and_content() {
        let mut note = Note::new("a", "t", "c", Vec::new());
        note.title = "   ".to_string();
        assert_eq!(note.validate(), Err(NoteValidationError::EmptyTitle));
        note.title = "t".to_string();
        note.content = "\n".to_string();
        assert_eq!(note.validate(), Err(NoteValidationError::EmptyContent));
    }

    #[test]
    fn serialized_field_names_are_camel_case() {
        let note = Note::with_id("1700000000000", "lum1abc", "t", "c", vec!["x".into()]);
        let json = serde_json::to_value(&note).expect("note should serialize");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["id"], "1700000000000");
    }
}
