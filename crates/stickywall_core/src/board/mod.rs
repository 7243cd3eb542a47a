//! Local sticky-note board.
//!
//! # Responsibility
//! - Own the ordered note collection and the default avatar as explicit state.
//! - Persist the whole collection after every mutation.
//! - Compute note positions with a deterministic line-wrap layout.
//!
//! # Invariants
//! - Note ids are strictly increasing in creation order.
//! - Collection order is creation order; deletes keep the relative order.
//! - Positions are derived data and never read back as input.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod avatar;
mod controller;
pub mod layout;
pub mod storage;

pub use controller::{Board, BoardView};

pub type BoardResult<T> = Result<T, BoardError>;

/// Error raised by board storage and avatar handling.
#[derive(Debug)]
pub enum BoardError {
    /// The durable store failed.
    Storage(DbError),
    /// A stored value is not valid JSON for its key.
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
    /// The collection could not be serialized.
    Encode(serde_json::Error),
    /// A picked avatar file is not an image.
    NotAnImage(PathBuf),
    /// A picked avatar file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "board storage failed: {err}"),
            Self::Corrupt { key, source } => {
                write!(f, "stored board value `{key}` is corrupt: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode board notes: {err}"),
            Self::NotAnImage(path) => write!(f, "`{}` is not an image file", path.display()),
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::NotAnImage(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for BoardError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}
