//! Response construction helpers.

use bytes::Bytes;

use crate::body::{StowryBody, empty_body, json_body};
use crate::error::HttpError;

/// Build a JSON error response for `err`.
///
/// Body shape: `{"code": "...", "error": "...", "requestId": "..."}`.
#[must_use]
pub fn error_to_response(err: &HttpError, request_id: &str) -> http::Response<StowryBody> {
    let body = serde_json::json!({
        "code": err.code(),
        "error": err.to_string(),
        "requestId": request_id,
    });

    http::Response::builder()
        .status(err.status_code())
        .header("Content-Type", "application/json")
        .body(json_body(&body))
        .unwrap_or_else(|_| {
            http::Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(empty_body())
                .expect("static response should be valid")
        })
}

/// Build a `200 OK` response carrying object bytes.
#[must_use]
pub fn object_response(data: Bytes) -> http::Response<StowryBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/octet-stream")
        .header("Content-Length", data.len())
        .body(StowryBody::new(data))
        .expect("object response should be valid")
}

/// Build a bodiless response with the given status.
#[must_use]
pub fn empty_response(status: http::StatusCode) -> http::Response<StowryBody> {
    http::Response::builder()
        .status(status)
        .body(empty_body())
        .expect("empty response should be valid")
}
