//! Maps domain failures onto the wire error contract:
//! `{ "error": <code>, "message": <string>, "details"?: <any> }`.

use crate::error::Error;
use crate::web::validate::Issue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound {
                code,
                message,
                details,
            } => error_body(StatusCode::NOT_FOUND, code, &message, details),
            Error::Conflict {
                code,
                message,
                details,
            } => error_body(StatusCode::CONFLICT, code, &message, details),
            // Storage failures are logged with internals but never leak them.
            other => {
                tracing::error!("request failed: {other}");
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "Unexpected error",
                    None,
                )
            }
        }
    }
}

/// 400 response listing every rejected field.
pub fn validation_failed(issues: &[Issue]) -> Response {
    error_body(
        StatusCode::BAD_REQUEST,
        "ValidationError",
        "Invalid request payload",
        Some(json!(issues)),
    )
}

fn error_body(status: StatusCode, code: &str, message: &str, details: Option<Value>) -> Response {
    let mut body = json!({ "error": code, "message": message });
    if let Some(details) = details {
        body["details"] = details;
    }
    (status, Json(body)).into_response()
}
