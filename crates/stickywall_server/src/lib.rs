//! HTTP service for the shared sticky-note wall.
//!
//! # Responsibility
//! - Expose the note store over `/api/notes`.
//! - Serve the static front-end bundle from the public directory.

pub mod app;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod static_files;

pub use app::{build_router, AppState};
pub use config::{ConfigError, ServerConfig};
