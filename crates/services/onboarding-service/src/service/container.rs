//! Service Container - Centralized service access.
//!
//! Depends on service traits, not implementations, so handlers can be
//! driven by mocks in tests.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{ConfigManager, ConfigService, OnboardingManager, OnboardingService};
use crate::repository::{ConfigStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get configuration service
    fn config(&self) -> Arc<dyn ConfigService>;

    /// Get onboarding service
    fn onboarding(&self) -> Arc<dyn OnboardingService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    config_service: Arc<dyn ConfigService>,
    onboarding_service: Arc<dyn OnboardingService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        config_service: Arc<dyn ConfigService>,
        onboarding_service: Arc<dyn OnboardingService>,
    ) -> Self {
        Self {
            config_service,
            onboarding_service,
        }
    }

    /// Wire repositories and services over one database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let config_repo = Arc::new(ConfigStore::new(db.clone()));
        let user_repo = Arc::new(UserStore::new(db));

        let config_service: Arc<dyn ConfigService> = Arc::new(ConfigManager::new(config_repo));
        let onboarding_service = Arc::new(OnboardingManager::new(user_repo, config_service.clone()));

        Self {
            config_service,
            onboarding_service,
        }
    }
}

impl ServiceContainer for Services {
    fn config(&self) -> Arc<dyn ConfigService> {
        self.config_service.clone()
    }

    fn onboarding(&self) -> Arc<dyn OnboardingService> {
        self.onboarding_service.clone()
    }
}
