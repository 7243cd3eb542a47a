//! Local board note model.
//!
//! # Invariants
//! - `id` is unique within one board and never changes.
//! - `color` is fixed at creation.
//! - `x`/`y` are layout output only and get overwritten by every layout pass.

use serde::{Deserialize, Serialize};

/// Creation timestamp in epoch milliseconds, doubling as the note identity.
pub type BoardNoteId = i64;

/// One of the five fixed categorical colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteColor {
    #[serde(rename = "color1")]
    Color1,
    #[serde(rename = "color2")]
    Color2,
    #[serde(rename = "color3")]
    Color3,
    #[serde(rename = "color4")]
    Color4,
    #[serde(rename = "color5")]
    Color5,
}

impl NoteColor {
    pub const ALL: [NoteColor; 5] = [
        NoteColor::Color1,
        NoteColor::Color2,
        NoteColor::Color3,
        NoteColor::Color4,
        NoteColor::Color5,
    ];

    /// Picks one color uniformly at random.
    ///
    /// Randomness comes from a v4 UUID, which carries 122 random bits.
    pub fn random() -> Self {
        let index = uuid::Uuid::new_v4().as_u128() % Self::ALL.len() as u128;
        Self::ALL[index as usize]
    }

    /// CSS class name used by board renderers.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Color1 => "color1",
            Self::Color2 => "color2",
            Self::Color3 => "color3",
            Self::Color4 => "color4",
            Self::Color5 => "color5",
        }
    }
}

/// A note pinned on the local board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardNote {
    pub id: BoardNoteId,
    pub text: String,
    pub color: NoteColor,
    pub avatar: String,
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
}

impl BoardNote {
    /// Creates an empty note positioned at the origin until the next layout.
    pub fn new(id: BoardNoteId, color: NoteColor, avatar: impl Into<String>) -> Self {
        Self {
            id,
            text: String::new(),
            color,
            avatar: avatar.into(),
            x: 0,
            y: 0,
        }
    }
}
