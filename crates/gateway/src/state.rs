//! Application state for dependency injection.

use std::sync::Arc;

use onboarding_service_lib::infra::Database;
use onboarding_service_lib::service::{ConfigService, OnboardingService, ServiceContainer};

use common::SessionConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config_service: Arc<dyn ConfigService>,
    pub onboarding_service: Arc<dyn OnboardingService>,
    pub database: Database,
    pub session: SessionConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        services: &dyn ServiceContainer,
        database: Database,
        session: SessionConfig,
    ) -> Self {
        Self {
            config_service: services.config(),
            onboarding_service: services.onboarding(),
            database,
            session,
        }
    }
}
