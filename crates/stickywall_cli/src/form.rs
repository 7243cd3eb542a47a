//! Form client state: drafts, flags, error slot and the last fetched list.

use crate::client::{NewNote, NotesApi};
use log::{info, warn};
use stickywall_core::Note;

/// Color attached to every note posted from the form.
pub const FORM_NOTE_COLOR: &str = "#ffeb3b";

const LOAD_FAILED_MESSAGE: &str = "failed to load notes, please try again later";
const SUBMIT_FAILED_MESSAGE: &str = "failed to post note";

/// Outcome of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted,
    /// Content was blank; nothing was sent.
    Blocked,
    /// The request failed; see [`NoteForm::error`].
    Failed,
}

/// One form session against a [`NotesApi`].
pub struct NoteForm<A: NotesApi> {
    api: A,
    pub author: String,
    pub content: String,
    notes: Vec<Note>,
    loading_list: bool,
    submitting: bool,
    error: Option<String>,
}

impl<A: NotesApi> NoteForm<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            author: String::new(),
            content: String::new(),
            notes: Vec::new(),
            loading_list: false,
            submitting: false,
            error: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_list
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Replaces the list with the server's current notes.
    ///
    /// On failure the previous list is kept and the error slot is set.
    pub fn load(&mut self) {
        self.loading_list = true;
        self.error = None;
        match self.api.fetch_notes() {
            Ok(notes) => {
                info!(
                    "event=notes_fetch module=form status=ok count={}",
                    notes.len()
                );
                self.notes = notes;
            }
            Err(err) => {
                warn!("event=notes_fetch module=form status=error error={err}");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.loading_list = false;
    }

    /// Posts the drafts, then clears them and reloads the list on success.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.content.trim().is_empty() {
            self.error = Some("please enter some content first".to_string());
            return SubmitOutcome::Blocked;
        }

        self.submitting = true;
        self.error = None;
        let note = NewNote {
            author: self.author.clone(),
            content: self.content.clone(),
            color: FORM_NOTE_COLOR.to_string(),
        };
        let outcome = match self.api.post_note(&note) {
            Ok(created) => {
                info!(
                    "event=note_post module=form status=ok note_id={}",
                    created.id
                );
                self.author.clear();
                self.content.clear();
                self.load();
                SubmitOutcome::Posted
            }
            Err(err) => {
                warn!(
                    "event=note_post module=form status=error http_status={} error={err}",
                    err.status().map_or_else(|| "none".to_string(), |s| s.to_string())
                );
                let message = err.to_string();
                self.error = Some(if message.trim().is_empty() {
                    SUBMIT_FAILED_MESSAGE.to_string()
                } else {
                    message
                });
                SubmitOutcome::Failed
            }
        };
        self.submitting = false;
        outcome
    }
}
