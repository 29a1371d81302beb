// handlers/protected/users/show.rs - GET /users/:id handler

use axum::extract::{Path, State};

use crate::database::models::user::User;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_id;

/// GET /users/:id - a single live user
pub async fn user_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    let id = validate_id(&id)?;

    match state.users.get_user_by_id(id).await? {
        Some(user) => Ok(ApiResponse::success(user)),
        None => Err(ApiError::user_not_found()),
    }
}
