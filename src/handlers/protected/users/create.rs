// handlers/protected/users/create.rs - POST /users handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::database::models::user::User;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_full_user;

/**
 * POST /users - Create a user
 *
 * Expected Input:
 * ```json
 * {
 *   "email": "string",    // Required: valid email address
 *   "name": "string",     // Required: non-empty
 *   "age": 0,             // Required: integer >= 0
 *   "city": "string",     // Required: non-empty
 *   "zipCode": "string"   // Required: exactly 5 characters
 * }
 * ```
 *
 * Any other keys (including `id`) are ignored.
 *
 * @returns 201 with the stored user, including its generated id
 */
pub async fn user_create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let Json(payload) = payload?;
    let user = validate_full_user(&payload)?;

    let created = state.users.create_user(user).await?;
    Ok(ApiResponse::created(created))
}
