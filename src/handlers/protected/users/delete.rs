// handlers/protected/users/delete.rs - DELETE /users/:id handler

use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_id;

/// DELETE /users/:id - soft delete; the row stays in the table, flagged
pub async fn user_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = validate_id(&id)?;

    if state.users.delete_user(id).await? {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::user_not_found())
    }
}
