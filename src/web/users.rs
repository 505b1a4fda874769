//! `/v1/users` handlers.

use crate::error::Error;
use crate::model::UserRecord;
use crate::state::AppState;
use crate::web::{response, validate};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

/// Routes mounted under `/v1/users`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/by-email/{email}", get(get_user_by_email))
}

/// GET /v1/users - all users in storage order
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, Error> {
    Ok(Json(state.users.list_users().await?))
}

/// POST /v1/users - create a user (201)
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, Error> {
    let input = match validate::new_user(&body) {
        Ok(input) => input,
        Err(issues) => return Ok(response::validation_failed(&issues)),
    };
    let user = state.users.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// GET /v1/users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, Error> {
    Ok(Json(state.users.get_user_by_id(&id).await?))
}

/// GET /v1/users/by-email/{email}
async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, Error> {
    if let Err(issues) = validate::email_param(&email) {
        return Ok(response::validation_failed(&issues));
    }
    let user = state.users.get_user_by_email(&email).await?;
    Ok(Json(user).into_response())
}

/// PATCH /v1/users/{id} - partial update
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, Error> {
    let patch = match validate::user_patch(&body) {
        Ok(patch) => patch,
        Err(issues) => return Ok(response::validation_failed(&issues)),
    };
    let user = state.users.update_user(&id, patch).await?;
    Ok(Json(user).into_response())
}

/// DELETE /v1/users/{id} - hard delete (204)
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    state.users.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
