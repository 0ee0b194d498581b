//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::repo::ThingRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ThingRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ThingRepository>, config: AppConfig) -> Self {
        AppState {
            repo,
            config: Arc::new(config),
        }
    }
}
