//! Board state container and controller.
//!
//! # Responsibility
//! - Hold notes, default avatar, storage and view as one owned value.
//! - Keep an explicit `id -> view handle` map instead of querying the view.
//! - Run a layout pass after add/delete/resize.
//!
//! # Invariants
//! - Every note in `notes` has exactly one mounted handle.
//! - Storage is written synchronously after each mutation.

use super::avatar::read_avatar_file;
use super::layout::{arrange, WrapRowHeight};
use super::storage::{
    load_default_avatar, load_notes, save_default_avatar, save_notes, BoardStorage,
};
use super::BoardResult;
use crate::model::board_note::{BoardNote, BoardNoteId, NoteColor};
use log::debug;
use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Rendering surface for board notes.
///
/// The board never looks notes up in the view; it keeps the handles returned
/// by [`BoardView::mount`] and passes them back.
pub trait BoardView {
    /// Opaque reference to one rendered note.
    type Handle;

    /// Renders a note and returns its handle.
    fn mount(&mut self, note: &BoardNote) -> Self::Handle;
    /// Removes a rendered note.
    fn unmount(&mut self, handle: Self::Handle);
    /// Moves a rendered note.
    fn place(&mut self, handle: &Self::Handle, x: i64, y: i64);
    /// Refreshes the text shown by a rendered note.
    fn show_text(&mut self, handle: &Self::Handle, text: &str);
    /// Swaps the avatar image of a rendered note.
    fn show_avatar(&mut self, handle: &Self::Handle, avatar: &str);
    /// Current rendered height of a note.
    fn rendered_height(&self, handle: &Self::Handle) -> i64;
    /// Current width of the board container.
    fn container_width(&self) -> i64;
}

/// Local board: ordered notes plus the process-wide default avatar.
pub struct Board<S: BoardStorage, V: BoardView> {
    storage: S,
    view: V,
    notes: Vec<BoardNote>,
    default_avatar: String,
    handles: HashMap<BoardNoteId, V::Handle>,
    last_issued_id: BoardNoteId,
    wrap_policy: WrapRowHeight,
}

impl<S: BoardStorage, V: BoardView> Board<S, V> {
    /// Loads the stored board, mounts every note and runs a layout pass.
    pub fn open(storage: S, view: V) -> BoardResult<Self> {
        Self::open_with_policy(storage, view, WrapRowHeight::default())
    }

    /// Same as [`Board::open`] with an explicit row-wrap policy.
    pub fn open_with_policy(
        storage: S,
        mut view: V,
        wrap_policy: WrapRowHeight,
    ) -> BoardResult<Self> {
        let notes = load_notes(&storage)?;
        let default_avatar = load_default_avatar(&storage)?;
        let handles = notes
            .iter()
            .map(|note| (note.id, view.mount(note)))
            .collect::<HashMap<_, _>>();
        let last_issued_id = notes.iter().map(|note| note.id).max().unwrap_or(0);

        let mut board = Self {
            storage,
            view,
            notes,
            default_avatar,
            handles,
            last_issued_id,
            wrap_policy,
        };
        board.arrange_layout()?;
        Ok(board)
    }

    /// Notes in board order.
    pub fn notes(&self) -> &[BoardNote] {
        &self.notes
    }

    /// Looks up one note.
    pub fn note(&self, id: BoardNoteId) -> Option<&BoardNote> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Avatar inherited by the next created note.
    pub fn default_avatar(&self) -> &str {
        &self.default_avatar
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable view access, e.g. to change the container width before
    /// calling [`Board::resize`].
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a note stamped with the current time and a random color.
    pub fn add_note(&mut self) -> BoardResult<BoardNoteId> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);
        self.add_note_with(now_ms, NoteColor::random())
    }

    /// Creates a note with a caller-chosen timestamp and color.
    ///
    /// The id is `now_ms`, bumped past every id issued so far so that ids stay
    /// strictly increasing even when the clock stalls or goes backwards.
    pub fn add_note_with(&mut self, now_ms: i64, color: NoteColor) -> BoardResult<BoardNoteId> {
        let id = now_ms.max(self.last_issued_id + 1);
        self.last_issued_id = id;

        let note = BoardNote::new(id, color, self.default_avatar.clone());
        let handle = self.view.mount(&note);
        self.handles.insert(id, handle);
        self.notes.push(note);
        self.save()?;
        self.arrange_layout()?;

        debug!(
            "event=board_add module=board status=ok note_id={id} color={}",
            color.class_name()
        );
        Ok(id)
    }

    /// Overwrites the text of one note. Returns `false` when the id is unknown.
    pub fn edit_text(&mut self, id: BoardNoteId, text: impl Into<String>) -> BoardResult<bool> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return Ok(false);
        };
        note.text = text.into();
        if let Some(handle) = self.handles.get(&id) {
            self.view.show_text(handle, &note.text);
        }
        self.save()?;
        Ok(true)
    }

    /// Removes one note. Returns `false` when the id is unknown.
    pub fn delete_note(&mut self, id: BoardNoteId) -> BoardResult<bool> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return Ok(false);
        };
        self.notes.remove(index);
        self.save()?;
        if let Some(handle) = self.handles.remove(&id) {
            self.view.unmount(handle);
        }
        self.arrange_layout()?;

        debug!("event=board_delete module=board status=ok note_id={id}");
        Ok(true)
    }

    /// Replaces a note's avatar with a picked image file.
    ///
    /// The image also becomes the default avatar for notes created later.
    /// `None` (no file picked) and unknown ids are no-ops returning `false`.
    pub fn change_avatar(
        &mut self,
        id: BoardNoteId,
        picked_file: Option<&Path>,
    ) -> BoardResult<bool> {
        let Some(path) = picked_file else {
            return Ok(false);
        };
        if self.note(id).is_none() {
            return Ok(false);
        }

        let avatar = read_avatar_file(path)?;
        self.set_avatar(id, avatar)
    }

    /// Sets an already encoded avatar on a note and as the default avatar.
    ///
    /// Both stored values are written before the in-memory board changes, so a
    /// failed write leaves the board as it was.
    pub fn set_avatar(&mut self, id: BoardNoteId, avatar: String) -> BoardResult<bool> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return Ok(false);
        };

        let mut updated = self.notes.clone();
        updated[index].avatar = avatar.clone();
        save_notes(&mut self.storage, &updated)?;
        if let Err(err) = save_default_avatar(&mut self.storage, &avatar) {
            // Put the stored collection back in line with memory.
            let _ = save_notes(&mut self.storage, &self.notes);
            return Err(err);
        }

        self.notes = updated;
        self.default_avatar = avatar;
        if let Some(handle) = self.handles.get(&id) {
            self.view.show_avatar(handle, &self.default_avatar);
        }

        debug!("event=board_avatar module=board status=ok note_id={id}");
        Ok(true)
    }

    /// Re-runs layout after the view's container width changed.
    pub fn resize(&mut self) -> BoardResult<()> {
        self.arrange_layout()
    }

    /// Recomputes every note position in board order and persists them.
    pub fn arrange_layout(&mut self) -> BoardResult<()> {
        let heights = self
            .notes
            .iter()
            .map(|note| {
                self.handles
                    .get(&note.id)
                    .map_or(0, |handle| self.view.rendered_height(handle))
            })
            .collect::<Vec<_>>();
        let positions = arrange(&heights, self.view.container_width(), self.wrap_policy);

        for (note, position) in self.notes.iter_mut().zip(positions) {
            note.x = position.x;
            note.y = position.y;
            if let Some(handle) = self.handles.get(&note.id) {
                self.view.place(handle, position.x, position.y);
            }
        }

        self.save()
    }

    fn save(&mut self) -> BoardResult<()> {
        save_notes(&mut self.storage, &self.notes)?;
        debug!(
            "event=board_save module=board status=ok notes={}",
            self.notes.len()
        );
        Ok(())
    }
}
