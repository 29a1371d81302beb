// handlers/protected/users/list.rs - GET /users handler

use axum::extract::State;

use crate::database::models::user::User;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users - all live users
pub async fn user_list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users.get_all_users().await?;
    Ok(ApiResponse::success(users))
}
