use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Shared handles for middleware and handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub sessions: Arc<dyn SessionStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool, sessions: Arc<dyn SessionStore>, tokens: TokenService) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            sessions,
            tokens: Arc::new(tokens),
        }
    }
}
