use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod testing;
pub mod validation;

pub use state::AppState;

/// Build the full router: public routes, the Basic-auth gated user routes
/// under the configured prefix, and the global layers the config asks for.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let protected = handlers::protected::routes().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::basic_auth_middleware,
    ));
    let protected = match config.server.path_prefix.as_str() {
        "" => protected,
        prefix => Router::new().nest(prefix, protected),
    };

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Protected
        .merge(protected)
        .fallback(handlers::public::not_found)
        .with_state(state);

    // Global middleware
    if !config.api.expose_internal_errors {
        router = router.layer(axum_middleware::map_response(middleware::redact_internal_errors));
    }
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}
