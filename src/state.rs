use std::fmt;
use std::sync::Arc;

use crate::backend::{Backend, HostedBackend};
use crate::config::backend::BackendConfig;
use crate::config::cors::CorsConfig;
use crate::config::session::SessionConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("session_config", &self.session_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

pub fn init_app_state() -> AppState {
    AppState {
        backend: Arc::new(HostedBackend::new(BackendConfig::from_env())),
        session_config: SessionConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
