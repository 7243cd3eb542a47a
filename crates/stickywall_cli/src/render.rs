//! Plain-text rendering for the form client and the board.

use crate::client::NotesApi;
use crate::form::NoteForm;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Write;
use stickywall_core::{BoardNote, Note};

pub const ANONYMOUS_AUTHOR: &str = "anonymous";
pub const LOADING_TEXT: &str = "loading notes...";
pub const SUBMITTING_TEXT: &str = "posting...";
pub const EMPTY_TEXT: &str = "no notes yet, be the first to post one!";

/// Author label, falling back to [`ANONYMOUS_AUTHOR`] when absent or blank.
pub fn author_label(note: &Note) -> &str {
    note.author
        .as_deref()
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .unwrap_or(ANONYMOUS_AUTHOR)
}

/// `YYYY/MM/DD HH:MM` in the given timezone.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%Y/%m/%d %H:%M").to_string()
}

/// Renders the form's list section: error slot, then loading/empty text or notes.
pub fn render_note_list<A: NotesApi>(form: &NoteForm<A>) -> String {
    let list = render_notes_in(form.notes(), form.is_loading(), form.error(), &Local);
    if form.is_submitting() {
        format!("{SUBMITTING_TEXT}\n{list}")
    } else {
        list
    }
}

fn render_notes_in<Tz: TimeZone>(
    notes: &[Note],
    loading: bool,
    error: Option<&str>,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if let Some(error) = error {
        let _ = writeln!(out, "error: {error}");
    }
    if loading {
        let _ = writeln!(out, "{LOADING_TEXT}");
        return out;
    }
    if notes.is_empty() {
        let _ = writeln!(out, "{EMPTY_TEXT}");
        return out;
    }
    for note in notes {
        let _ = writeln!(
            out,
            "{}  {}\n  {}\n",
            author_label(note),
            format_timestamp(&note.created_at, tz),
            note.content.replace('\n', "\n  ")
        );
    }
    out
}

/// Renders board notes in display order with their positions.
pub fn render_board(notes: &[BoardNote], default_avatar: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "default avatar: {}", avatar_label(default_avatar));
    if notes.is_empty() {
        let _ = writeln!(out, "(board is empty)");
        return out;
    }
    for note in notes {
        let text = if note.text.is_empty() {
            "<empty>"
        } else {
            note.text.as_str()
        };
        let _ = writeln!(
            out,
            "#{} [{}] at ({}, {}) avatar={}\n  {}",
            note.id,
            note.color.class_name(),
            note.x,
            note.y,
            avatar_label(&note.avatar),
            text.replace('\n', "\n  ")
        );
    }
    out
}

/// Data URLs are summarized by their media type.
fn avatar_label(avatar: &str) -> String {
    match avatar
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(';'))
    {
        Some((mime, _)) => format!("<{mime} data>"),
        None => avatar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use stickywall_core::{NoteColor, NoteId};

    fn note(author: Option<&str>, content: &str) -> Note {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 16, 7, 0).unwrap();
        Note {
            id: NoteId::from_u128(7),
            author: author.map(str::to_string),
            content: content.to_string(),
            color: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn blank_or_missing_author_is_anonymous() {
        assert_eq!(author_label(&note(None, "x")), ANONYMOUS_AUTHOR);
        assert_eq!(author_label(&note(Some("  "), "x")), ANONYMOUS_AUTHOR);
        assert_eq!(author_label(&note(Some(" ann "), "x")), "ann");
    }

    #[test]
    fn timestamp_uses_local_offset() {
        let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 16, 7, 0).unwrap();
        assert_eq!(format_timestamp(&at, &taipei), "2024/03/06 00:07");
    }

    #[test]
    fn loading_and_empty_states_have_their_own_text() {
        assert_eq!(render_notes_in(&[], true, None, &Utc), format!("{LOADING_TEXT}\n"));
        assert_eq!(render_notes_in(&[], false, None, &Utc), format!("{EMPTY_TEXT}\n"));
    }

    #[test]
    fn notes_render_author_time_and_content() {
        let out = render_notes_in(&[note(None, "hi")], false, Some("boom"), &Utc);
        assert_eq!(out, "error: boom\nanonymous  2024/03/05 16:07\n  hi\n\n");
    }

    #[test]
    fn board_render_summarizes_data_url_avatars() {
        let mut board_note = BoardNote::new(3, NoteColor::Color2, "data:image/png;base64,aGkh");
        board_note.text = "todo".to_string();
        let out = render_board(&[board_note], "photo.png");
        assert!(out.starts_with("default avatar: photo.png\n"));
        assert!(out.contains("#3 [color2] at (0, 0) avatar=<image/png data>"));
        assert!(out.contains("\n  todo\n"));
    }
}
