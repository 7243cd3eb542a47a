//! Domain models for both note shapes.
//!
//! # Responsibility
//! - `note`: server-persisted notes served by the REST API.
//! - `board_note`: locally persisted notes laid out on the board.
//!
//! The two shapes share only the concept of a note and are never converted
//! into each other.

pub mod board_note;
pub mod note;
