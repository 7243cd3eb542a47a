//! Durable key/value storage behind the local board.
//!
//! # Responsibility
//! - Abstract the browser-style local store as a string key/value contract.
//! - Provide an in-memory store and a SQLite-backed file store.
//! - Encode/decode the two board keys.
//!
//! # Invariants
//! - `notes` always holds the JSON array of the whole collection.
//! - `userAvatar` holds the raw avatar string (URL or data URL), not JSON.

use super::{BoardError, BoardResult};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::board_note::BoardNote;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

/// Key holding the serialized note array.
pub const NOTES_KEY: &str = "notes";
/// Key holding the current default avatar.
pub const AVATAR_KEY: &str = "userAvatar";
/// Avatar used until the user picks one.
pub const DEFAULT_AVATAR: &str = "photo.png";

/// String key/value store with local-storage semantics.
pub trait BoardStorage {
    /// Returns the stored value, or `None` when the key was never written.
    fn get_item(&self, key: &str) -> BoardResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> BoardResult<()>;
}

/// Process-local store, mainly for tests and ephemeral boards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> BoardResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> BoardResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store using the `local_storage` table.
pub struct SqliteBoardStorage {
    conn: Connection,
}

impl SqliteBoardStorage {
    /// Opens (and migrates) the board database file.
    pub fn open(path: impl AsRef<Path>) -> BoardResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory board database.
    pub fn open_in_memory() -> BoardResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl BoardStorage for SqliteBoardStorage {
    fn get_item(&self, key: &str) -> BoardResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM local_storage WHERE key = ?1;")
            .map_err(DbError::from)?;
        let mut rows = stmt.query([key]).map_err(DbError::from)?;
        match rows.next().map_err(DbError::from)? {
            Some(row) => Ok(Some(row.get(0).map_err(DbError::from)?)),
            None => Ok(None),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> BoardResult<()> {
        self.conn
            .execute(
                "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
                params![key, value],
            )
            .map_err(DbError::from)?;
        Ok(())
    }
}

/// Loads the note collection; a missing or empty value is an empty board.
pub fn load_notes(storage: &impl BoardStorage) -> BoardResult<Vec<BoardNote>> {
    match storage.get_item(NOTES_KEY)? {
        Some(raw) if !raw.is_empty() => {
            serde_json::from_str(&raw).map_err(|source| BoardError::Corrupt {
                key: NOTES_KEY,
                source,
            })
        }
        _ => Ok(Vec::new()),
    }
}

/// Writes the whole note collection.
pub fn save_notes(storage: &mut impl BoardStorage, notes: &[BoardNote]) -> BoardResult<()> {
    let raw = serde_json::to_string(notes).map_err(BoardError::Encode)?;
    storage.set_item(NOTES_KEY, &raw)
}

/// Loads the default avatar, falling back to [`DEFAULT_AVATAR`] when the
/// value is missing or empty.
pub fn load_default_avatar(storage: &impl BoardStorage) -> BoardResult<String> {
    Ok(storage
        .get_item(AVATAR_KEY)?
        .filter(|avatar| !avatar.is_empty())
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string()))
}

/// Writes the default avatar.
pub fn save_default_avatar(storage: &mut impl BoardStorage, avatar: &str) -> BoardResult<()> {
    storage.set_item(AVATAR_KEY, avatar)
}
