use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::user_store::UserStore;
use crate::middleware::auth::BasicAuth;
use crate::services::UserService;

/// Everything a request handler can reach, built once by the composition root
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub auth: BasicAuth,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
            auth: BasicAuth::from_config(&config.security),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for BasicAuth {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
