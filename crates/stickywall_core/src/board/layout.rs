//! Left-to-right line-wrap placement for board notes.
//!
//! # Invariants
//! - Placement is a pure function of note order, note heights and container
//!   width; running it twice yields identical positions.
//! - Every note has the same fixed width.

/// Fixed rendered width of a note.
pub const NOTE_WIDTH: i64 = 220;
/// Horizontal and vertical spacing between notes.
pub const GAP: i64 = 30;
/// Left and right container margin.
pub const MARGIN: i64 = 10;
/// Top offset of the first row, below the board toolbar.
pub const START_Y: i64 = 80;

/// How far the cursor moves down when a row wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapRowHeight {
    /// Advance by the height of the note about to be placed. Rows mixing
    /// short and tall notes can overlap the next row.
    #[default]
    Incoming,
    /// Advance by the tallest note placed in the row just completed.
    TallestPlaced,
}

/// Top-left corner of a placed note, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

/// Computes positions for notes of the given heights, in order.
pub fn arrange(heights: &[i64], container_width: i64, policy: WrapRowHeight) -> Vec<Position> {
    let mut positions = Vec::with_capacity(heights.len());
    let mut x = MARGIN;
    let mut y = START_Y;
    let mut row_tallest: Option<i64> = None;

    for &height in heights {
        if x + NOTE_WIDTH > container_width - MARGIN {
            x = MARGIN;
            let advance = match (policy, row_tallest) {
                (WrapRowHeight::TallestPlaced, Some(tallest)) => tallest,
                _ => height,
            };
            y += advance + GAP;
            row_tallest = None;
        }

        positions.push(Position { x, y });
        row_tallest = Some(row_tallest.map_or(height, |tallest| tallest.max(height)));
        x += NOTE_WIDTH + GAP;
    }

    positions
}

/// Number of notes that fit on one row before the first wrap.
pub fn notes_per_row(container_width: i64) -> usize {
    let usable = container_width - 2 * MARGIN + GAP;
    if usable <= 0 {
        return 0;
    }
    (usable / (NOTE_WIDTH + GAP)) as usize
}

#[cfg(test)]
mod tests {
    use super::{arrange, notes_per_row, Position, WrapRowHeight, GAP, MARGIN, NOTE_WIDTH, START_Y};

    #[test]
    fn first_row_starts_at_margin_and_start_offset() {
        let positions = arrange(&[100, 100], 1000, WrapRowHeight::Incoming);
        assert_eq!(
            positions,
            vec![
                Position { x: MARGIN, y: START_Y },
                Position {
                    x: MARGIN + NOTE_WIDTH + GAP,
                    y: START_Y
                },
            ]
        );
    }

    #[test]
    fn wrap_uses_incoming_note_height_by_default() {
        // 500px fits two notes per row: 10 + 220 + 30 + 220 = 480 <= 490.
        let positions = arrange(&[300, 100, 40], 500, WrapRowHeight::Incoming);
        assert_eq!(positions[2], Position { x: MARGIN, y: START_Y + 40 + GAP });
    }

    #[test]
    fn tallest_placed_policy_clears_the_previous_row() {
        let positions = arrange(&[300, 100, 40], 500, WrapRowHeight::TallestPlaced);
        assert_eq!(positions[2], Position { x: MARGIN, y: START_Y + 300 + GAP });
    }

    #[test]
    fn narrow_container_wraps_before_the_first_note() {
        let positions = arrange(&[50], 100, WrapRowHeight::Incoming);
        assert_eq!(positions[0], Position { x: MARGIN, y: START_Y + 50 + GAP });
        assert_eq!(notes_per_row(100), 0);
    }

    #[test]
    fn notes_per_row_matches_closed_form() {
        assert_eq!(notes_per_row(500), 2);
        assert_eq!(notes_per_row(240), 1);
        assert_eq!(notes_per_row(239), 0);
        assert_eq!(notes_per_row(1200), 4);
    }
}
