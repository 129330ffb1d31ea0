use std::sync::Arc;

use setlist_db::DbPool;

use crate::config::ServerConfig;

/// Everything a handler needs, injected once at startup through
/// `State<AppState>`. Cloning shares the pool and the configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
