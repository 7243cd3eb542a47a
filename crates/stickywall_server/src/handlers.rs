//! Note API handlers.
//!
//! Error mapping: validation -> 400, unknown id -> 404, anything else -> 500
//! with a generic message and the cause logged.

use crate::app::AppState;
use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use log::{error, warn};
use serde_json::{json, Value};
use stickywall_core::{NoteDraft, NoteServiceError};
use uuid::Uuid;

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// `GET /api/notes`: the full collection, newest first.
pub async fn list_notes_handler(State(state): State<AppState>) -> Response {
    match state.with_note_service(|service| service.list_notes()).await {
        Ok(notes) => Json(notes).into_response(),
        Err(err) => {
            error!("event=note_list module=http status=error error={err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to load notes")
        }
    }
}

/// `POST /api/notes`: creates a note from `{author?, content, color?}`.
///
/// JSON and url-encoded form bodies are decoded; any other content type is
/// read as an empty draft.
pub async fn create_note_handler(State(state): State<AppState>, req: Request) -> Response {
    let draft = match body_kind(req.headers()) {
        BodyKind::Json => match Bytes::from_request(req, &state).await {
            Ok(body) => parse_json_draft(&body),
            Err(rejection) => return rejection.into_response(),
        },
        BodyKind::Form => match Form::<NoteDraft>::from_request(req, &state).await {
            Ok(Form(draft)) => Ok(draft),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return rejection.into_response()
            }
            Err(_) => Err(BAD_FORM_BODY),
        },
        BodyKind::Other => Ok(NoteDraft::default()),
    };
    let draft = match draft {
        Ok(draft) => draft,
        Err(message) => {
            warn!("event=note_create module=http status=rejected reason=bad_body");
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    match state
        .with_note_service(move |service| service.create_note(draft))
        .await
    {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(NoteServiceError::InvalidContent(err)) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err) => {
            error!("event=note_create module=http status=error error={err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create note")
        }
    }
}

/// `DELETE /api/notes/:id`: removes one note.
pub async fn delete_note_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    // Ids that are not UUIDs cannot exist in the store.
    let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
        return error_response(StatusCode::NOT_FOUND, "note not found");
    };

    match state
        .with_note_service(move |service| service.delete_note(id))
        .await
    {
        Ok(()) => Json(json!({ "message": "note deleted" })).into_response(),
        Err(NoteServiceError::NoteNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "note not found")
        }
        Err(err) => {
            error!("event=note_delete module=http status=error note_id={id} error={err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to delete note")
        }
    }
}

const BAD_JSON_BODY: &str = "request body must be a JSON object with string fields";
const BAD_FORM_BODY: &str = "request body must be a form with text fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let mime = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .unwrap_or_default();
    match mime.as_str() {
        "application/json" => BodyKind::Json,
        "application/x-www-form-urlencoded" => BodyKind::Form,
        _ => BodyKind::Other,
    }
}

/// An empty body is an empty draft, so it fails on the content rule. Anything
/// else must be a JSON object.
fn parse_json_draft(body: &[u8]) -> Result<NoteDraft, &'static str> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NoteDraft::default());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value::<NoteDraft>(value).map_err(|_| BAD_JSON_BODY)
        }
        _ => Err(BAD_JSON_BODY),
    }
}

#[cfg(test)]
mod tests {
    use super::{body_kind, parse_json_draft, BodyKind};
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{HeaderMap, HeaderValue};
    use stickywall_core::NoteDraft;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn empty_body_parses_as_empty_draft() {
        assert_eq!(parse_json_draft(b"").unwrap(), NoteDraft::default());
        assert_eq!(parse_json_draft(b"  \n").unwrap(), NoteDraft::default());
    }

    #[test]
    fn unknown_fields_are_ignored_and_nulls_accepted() {
        let draft = parse_json_draft(br#"{"content":"hi","author":null,"extra":1}"#).unwrap();
        assert_eq!(draft, NoteDraft::with_content("hi"));
    }

    #[test]
    fn malformed_json_or_wrong_types_are_rejected() {
        assert!(parse_json_draft(b"{oops").is_err());
        assert!(parse_json_draft(br#"{"content": 5}"#).is_err());
    }

    #[test]
    fn only_json_objects_are_drafts() {
        assert!(parse_json_draft(br#"["ann","hi"]"#).is_err());
        assert!(parse_json_draft(br#""hi""#).is_err());
        assert!(parse_json_draft(b"null").is_err());
    }

    #[test]
    fn body_kind_follows_content_type_ignoring_parameters() {
        assert_eq!(
            body_kind(&headers(Some("application/json; charset=utf-8"))),
            BodyKind::Json
        );
        assert_eq!(
            body_kind(&headers(Some("application/x-www-form-urlencoded; charset=utf-8"))),
            BodyKind::Form
        );
        assert_eq!(body_kind(&headers(Some("text/plain"))), BodyKind::Other);
        assert_eq!(body_kind(&headers(None)), BodyKind::Other);
    }
}
