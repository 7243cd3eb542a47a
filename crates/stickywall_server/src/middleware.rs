//! Cross-cutting HTTP middleware: permissive CORS and request logging.

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{info, warn};
use std::time::Instant;
use stickywall_core::logging::sanitize_message;

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";
const DEFAULT_ALLOWED_HEADERS: &str = "content-type";
const MAX_LOGGED_PATH_CHARS: usize = 200;

/// Allows every origin. Preflight requests are answered here and never reach
/// the router.
pub async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let allowed_headers = req
            .headers()
            .get(ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOWED_HEADERS));

        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allowed_headers);
        return resp;
    }

    let mut resp = next.run(req).await;
    resp.headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    resp
}

/// Logs one line per request with method, path, status and duration.
pub async fn request_log_middleware(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let path = sanitize_message(req.uri().path(), MAX_LOGGED_PATH_CHARS);

    let resp = next.run(req).await;

    let http_status = resp.status();
    let duration_ms = started_at.elapsed().as_millis();
    if http_status.is_server_error() {
        warn!(
            "event=http_request module=http status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            http_status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=http status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            http_status.as_u16()
        );
    }
    resp
}
