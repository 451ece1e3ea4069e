// Application state module
// Shared, read-only state handed to every connection task

use std::sync::Arc;

use super::types::Config;
use crate::repository::HeroRepository;

/// Application state
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn HeroRepository>,
}

impl AppState {
    pub fn new(config: &Config, repository: Arc<dyn HeroRepository>) -> Self {
        Self {
            config: config.clone(),
            repository,
        }
    }

    /// Whether per-request access lines are written
    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
