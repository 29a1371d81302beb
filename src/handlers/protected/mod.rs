// handlers/protected/mod.rs - Handlers behind the Basic-auth gate
//
// Route Prefix: configurable, "/api" by default
// Middleware: basic_auth_middleware, applied as a route layer in lib.rs

use axum::Router;

use crate::state::AppState;

pub mod users;

pub use users::*;

pub fn routes() -> Router<AppState> {
    Router::new().merge(users::routes())
}
