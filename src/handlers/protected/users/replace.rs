// handlers/protected/users/replace.rs - PUT /users/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::user::User;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{validate_full_user, validate_id};

/// PUT /users/:id - overwrite all five business fields of a live user
pub async fn user_replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let id = validate_id(&id)?;
    let Json(payload) = payload?;
    let user = validate_full_user(&payload)?;

    match state.users.update_user(id, user).await? {
        Some(updated) => Ok(ApiResponse::success(updated)),
        None => Err(ApiError::user_not_found()),
    }
}
