//! Headless [`BoardView`] that estimates note heights from their text.

use std::collections::HashMap;
use stickywall_core::board::layout::NOTE_WIDTH;
use stickywall_core::{BoardNote, BoardView};

/// Height of an empty card: avatar row, delete button and padding.
const CARD_BASE_HEIGHT: i64 = 90;
const LINE_HEIGHT: i64 = 20;
/// Inner text width divided by an average glyph width.
const CHARS_PER_LINE: usize = ((NOTE_WIDTH - 20) / 8) as usize;

/// Terminal stand-in for the board container.
///
/// Only card texts are kept, to estimate heights; positions and avatars are
/// read back from the board notes when printing.
#[derive(Debug)]
pub struct TerminalBoardView {
    width: i64,
    next_handle: usize,
    texts: HashMap<usize, String>,
}

impl TerminalBoardView {
    pub fn new(width: i64) -> Self {
        Self {
            width,
            next_handle: 0,
            texts: HashMap::new(),
        }
    }

    #[cfg(test)]
    fn mounted(&self) -> usize {
        self.texts.len()
    }
}

/// Card height for a given text, counting soft-wrapped lines.
pub fn estimate_height(text: &str) -> i64 {
    let lines = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(CHARS_PER_LINE).max(1))
        .sum::<usize>();
    CARD_BASE_HEIGHT + LINE_HEIGHT * lines as i64
}

impl BoardView for TerminalBoardView {
    type Handle = usize;

    fn mount(&mut self, note: &BoardNote) -> usize {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.texts.insert(handle, note.text.clone());
        handle
    }

    fn unmount(&mut self, handle: usize) {
        self.texts.remove(&handle);
    }

    fn place(&mut self, _handle: &usize, _x: i64, _y: i64) {}

    fn show_text(&mut self, handle: &usize, text: &str) {
        if let Some(shown) = self.texts.get_mut(handle) {
            *shown = text.to_string();
        }
    }

    fn show_avatar(&mut self, _handle: &usize, _avatar: &str) {}

    fn rendered_height(&self, handle: &usize) -> i64 {
        self.texts.get(handle).map_or(0, |text| estimate_height(text))
    }

    fn container_width(&self) -> i64 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::{estimate_height, TerminalBoardView, CARD_BASE_HEIGHT, CHARS_PER_LINE, LINE_HEIGHT};
    use stickywall_core::{Board, MemoryStorage, WrapRowHeight};

    #[test]
    fn long_lines_wrap_into_extra_height() {
        assert_eq!(estimate_height(""), CARD_BASE_HEIGHT + LINE_HEIGHT);
        let long = "x".repeat(CHARS_PER_LINE + 1);
        assert_eq!(estimate_height(&long), CARD_BASE_HEIGHT + 2 * LINE_HEIGHT);
        assert_eq!(estimate_height("a\nb\nc"), CARD_BASE_HEIGHT + 3 * LINE_HEIGHT);
    }

    #[test]
    fn empty_cards_wrap_by_their_estimated_height() {
        let mut board = Board::open(MemoryStorage::new(), TerminalBoardView::new(500)).unwrap();
        let first = board.add_note().unwrap();
        let second = board.add_note().unwrap();
        let third = board.add_note().unwrap();
        assert!(first < second && second < third);

        // 500px fits two 220px cards per row.
        assert_eq!(board.view().mounted(), 3);
        let positions = board
            .notes()
            .iter()
            .map(|note| (note.x, note.y))
            .collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![
                (10, 80),
                (260, 80),
                (10, 80 + CARD_BASE_HEIGHT + LINE_HEIGHT + 30)
            ]
        );
    }

    #[test]
    fn wrap_height_follows_the_configured_policy() {
        for (policy, expected_lines) in [
            (WrapRowHeight::Incoming, 1),
            (WrapRowHeight::TallestPlaced, 3),
        ] {
            let view = TerminalBoardView::new(260);
            let mut board = Board::open_with_policy(MemoryStorage::new(), view, policy).unwrap();
            let first = board.add_note().unwrap();
            board.add_note().unwrap();
            board.edit_text(first, "a\nb\nc").unwrap();
            board.resize().unwrap();

            // One card per row at 260px.
            let expected = 80 + CARD_BASE_HEIGHT + expected_lines * LINE_HEIGHT + 30;
            assert_eq!(board.notes()[1].y, expected, "{policy:?}");
        }
    }

    #[test]
    fn deleting_unmounts_the_card() {
        let mut board = Board::open(MemoryStorage::new(), TerminalBoardView::new(1200)).unwrap();
        let id = board.add_note().unwrap();
        assert!(board.delete_note(id).unwrap());
        assert_eq!(board.view().mounted(), 0);
    }
}
