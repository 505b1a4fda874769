//! Request-scoped middleware.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Accept a caller-provided `x-request-id`, or mint a fresh UUID, and echo
/// it on the response so clients can correlate logs.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = match req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    let value = match HeaderValue::from_str(&id) {
        Ok(v) => v,
        // unrepresentable caller header; pass the request through untouched
        Err(_) => return next.run(req).await,
    };

    req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    let mut response = next.run(req).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
    response
}
