//! Avatar image loading for board notes.
//!
//! Picked files are embedded as `data:` URLs so the board store stays
//! self-contained.

use super::{BoardError, BoardResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Returns the image MIME type for a file, or `None` for non-image files.
pub fn image_mime_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "ico" => Some("image/x-icon"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Encodes raw bytes as a base64 `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Reads an image file and returns it as a `data:` URL.
///
/// # Errors
/// - `NotAnImage` when the extension does not map to an image type.
/// - `Io` when the file cannot be read.
pub fn read_avatar_file(path: &Path) -> BoardResult<String> {
    let mime = image_mime_for(path).ok_or_else(|| BoardError::NotAnImage(path.to_path_buf()))?;
    let bytes = std::fs::read(path).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_data_url(mime, &bytes))
}
