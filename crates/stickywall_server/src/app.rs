//! Shared application state and router assembly.

use crate::handlers::{create_note_handler, delete_note_handler, list_notes_handler};
use crate::middleware::{cors_middleware, request_log_middleware};
use crate::static_files::static_file_handler;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{delete, get};
use axum::Router;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use stickywall_core::{NoteService, NoteServiceError, SqliteNoteRepository};

/// State shared by every request handler.
///
/// The SQLite connection is the only shared mutable resource; it is locked
/// for the duration of one service call.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    public_dir: Arc<PathBuf>,
    max_body_bytes: usize,
}

impl AppState {
    /// Wraps a migrated connection and the static file root.
    pub fn new(conn: Connection, public_dir: impl Into<PathBuf>, max_body_bytes: usize) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            public_dir: Arc::new(public_dir.into()),
            max_body_bytes,
        }
    }

    pub fn public_dir(&self) -> &Path {
        self.public_dir.as_path()
    }

    /// Runs one note use-case on the blocking pool.
    pub(crate) async fn with_note_service<T, F>(&self, f: F) -> Result<T, NoteServiceError>
    where
        T: Send + 'static,
        F: FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, NoteServiceError>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| NoteServiceError::InconsistentState("note store lock poisoned"))?;
            let repo = SqliteNoteRepository::try_new(&conn)?;
            let service = NoteService::new(repo);
            f(&service)
        })
        .await
        .unwrap_or(Err(NoteServiceError::InconsistentState(
            "note store task aborted",
        )))
    }
}

/// Builds the HTTP router: notes API, static files, CORS and request logs.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notes",
            get(list_notes_handler).post(create_note_handler),
        )
        .route("/api/notes/:id", delete(delete_note_handler))
        .fallback(static_file_handler)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(from_fn(cors_middleware))
        .layer(from_fn(request_log_middleware))
        .with_state(state)
}
