//! HTTP adapter: routing, middleware layers, and the wire error contract.

pub mod middleware;
pub mod response;
pub mod users;
pub mod validate;

use crate::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// GET /health -- liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/v1/users", users::routes())
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
