//! Core domain logic for Sticky Wall.
//! This crate is the single source of truth for note invariants, both for the
//! server-persisted notes and for the local board.

pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use board::layout::{arrange, notes_per_row, Position, WrapRowHeight};
pub use board::storage::{BoardStorage, MemoryStorage, SqliteBoardStorage};
pub use board::{Board, BoardError, BoardResult, BoardView};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::board_note::{BoardNote, BoardNoteId, NoteColor};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
