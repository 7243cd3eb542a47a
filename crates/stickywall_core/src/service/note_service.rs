//! Note use-case service.
//!
//! # Responsibility
//! - Provide the create/list/delete use-cases behind the REST API.
//! - Assign server-side identity and timestamps.
//!
//! # Invariants
//! - Notes are created only from drafts with non-empty content.
//! - There is no update use-case for server notes.
//! - Listing always returns the full collection, newest first.

use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use chrono::Utc;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Draft failed validation.
    InvalidContent(NoteValidationError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContent(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidContent(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::Validation(err) => Self::InvalidContent(err),
            other => Self::Repo(other),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidContent(value)
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note and returns the stored record.
    pub fn create_note(&self, draft: NoteDraft) -> Result<Note, NoteServiceError> {
        let note = Note::from_draft(draft, Utc::now())?;
        let id = self.repo.insert_note(&note)?;
        let stored = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))?;

        info!(
            "event=note_create module=service status=ok note_id={} content_chars={}",
            stored.id,
            stored.content.chars().count()
        );
        Ok(stored)
    }

    /// Lists every note, newest first.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_notes()?)
    }

    /// Deletes one note by id.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }
}
