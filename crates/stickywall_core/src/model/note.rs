//! Server-side note model.
//!
//! # Responsibility
//! - Define the record stored by the note service and returned by the API.
//! - Validate the single content rule before persistence.
//!
//! # Invariants
//! - `content` is never empty.
//! - `id` is assigned once at creation and never reused.
//! - `created_at` and `updated_at` are assigned by the server, never by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a server note.
pub type NoteId = Uuid;

/// Validation failure for server notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `content` is missing or an empty string.
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content is required"),
        }
    }
}

impl Error for NoteValidationError {}

/// Caller-provided fields for a new note.
///
/// Every field is optional on the wire so that a missing `content` surfaces as
/// a validation error instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NoteDraft {
    /// Convenience constructor for a draft with content only.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Persisted server note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a new note from a draft with a fresh id and `now` timestamps.
    ///
    /// # Errors
    /// - `EmptyContent` when the draft has no content or an empty one.
    pub fn from_draft(draft: NoteDraft, now: DateTime<Utc>) -> Result<Self, NoteValidationError> {
        let content = match draft.content {
            Some(content) if !content.is_empty() => content,
            _ => return Err(NoteValidationError::EmptyContent),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            author: draft.author,
            content,
            color: draft.color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks the invariants enforced on every write and read-back.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}
