// handlers/public/mod.rs - Public handlers (no authentication)

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service description
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let prefix = &state.config.server.path_prefix;

    Json(json!({
        "name": "User Records API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "users": format!("{}/users (Basic auth)", prefix),
            "user": format!("{}/users/:id (Basic auth)", prefix),
        }
    }))
}

/// GET /health - store reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.users.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let detail = if state.config.api.expose_internal_errors {
                e.to_string()
            } else {
                "unavailable".to_string()
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": detail
                })),
            )
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Cannot {} {}", method, uri.path()))
}
