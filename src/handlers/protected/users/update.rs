// handlers/protected/users/update.rs - PATCH /users/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::user::User;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{validate_id, validate_partial_user};

/// PATCH /users/:id - merge the supplied fields onto the stored user
pub async fn user_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let id = validate_id(&id)?;
    let Json(payload) = payload?;
    let patch = validate_partial_user(&payload)?;

    match state.users.partial_update_user(id, patch).await? {
        Some(updated) => Ok(ApiResponse::success(updated)),
        None => Err(ApiError::user_not_found()),
    }
}
