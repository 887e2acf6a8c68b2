use crate::config::AppConfig;
use crate::dto::strategy::StrategyCatalog;
use crate::services::chunking;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub strategies: Arc<StrategyCatalog>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            strategies: Arc::new(chunking::catalog()),
        }
    }
}
