// handlers/protected/users/mod.rs - User record handlers
//
// Each handler validates its input (400), calls UserService, and maps the
// outcome: missing user -> 404 "User not found", store failure -> 500.

use axum::{routing::get, Router};

use crate::state::AppState;

pub mod create;   // POST /users
pub mod delete;   // DELETE /users/:id
pub mod list;     // GET /users
pub mod replace;  // PUT /users/:id
pub mod show;     // GET /users/:id
pub mod update;   // PATCH /users/:id

pub use create::user_create;
pub use delete::user_delete;
pub use list::user_list;
pub use replace::user_replace;
pub use show::user_show;
pub use update::user_update;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(user_list).post(user_create))
        .route(
            "/users/:id",
            get(user_show)
                .put(user_replace)
                .patch(user_update)
                .delete(user_delete),
        )
}
