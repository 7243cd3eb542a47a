//! HTTP client for the shared note wall.
//!
//! # Responsibility
//! - Fetch and post notes against `/api/notes`.
//! - Turn non-success responses into user-facing messages.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use stickywall_core::Note;

/// Body sent when posting a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub author: String,
    pub content: String,
    pub color: String,
}

/// Error returned by note API calls.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Status { status: u16, message: String },
    /// The response body was not the expected JSON.
    Decode(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Status { message, .. } => write!(f, "{message}"),
            Self::Decode(err) => write!(f, "unexpected response: {err}"),
        }
    }
}

impl Error for ApiError {}

impl ApiError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Remote note store as seen by the form client.
pub trait NotesApi {
    fn fetch_notes(&self) -> Result<Vec<Note>, ApiError>;
    fn post_note(&self, note: &NewNote) -> Result<Note, ApiError>;
}

/// [`NotesApi`] over blocking HTTP.
pub struct HttpNotesApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpNotesApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }
}

impl NotesApi for HttpNotesApi {
    fn fetch_notes(&self) -> Result<Vec<Note>, ApiError> {
        let resp = self
            .client
            .get(self.notes_url())
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode_response(resp, "failed to load notes")
    }

    fn post_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let resp = self
            .client
            .post(self.notes_url())
            .json(note)
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode_response(resp, "failed to post note")
    }
}

fn decode_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::blocking::Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
        });
    }
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Extracts the `error` field of an error body, if there is a usable one.
fn error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let message = value.get("error")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}
