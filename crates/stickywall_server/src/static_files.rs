//! Static file serving for the board front-end bundle.
//!
//! # Invariants
//! - Only files below the configured public directory are ever read.
//! - `/` maps to `index.html`.

use crate::app::AppState;
use crate::handlers::error_response;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};

const INDEX_FILE: &str = "index.html";

/// Router fallback: serves `GET`/`HEAD` requests from the public directory.
pub async fn static_file_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return error_response(StatusCode::NOT_FOUND, "not found");
    }

    let Some(path) = resolve_static_path(state.public_dir(), uri.path()) else {
        return error_response(StatusCode::NOT_FOUND, "not found");
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(CONTENT_TYPE, content_type_for(&path))], bytes).into_response(),
        Err(_) => error_response(StatusCode::NOT_FOUND, "not found"),
    }
}

/// Maps a request path onto the public directory.
///
/// Returns `None` for paths with parent, root or prefix components.
pub fn resolve_static_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        INDEX_FILE
    } else {
        relative
    };

    let mut resolved = public_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
