//! Configuration service - reads and replaces the step partition.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use common::AppResult;
use domain::{Configuration, Partition};

use crate::repository::ConfigRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Configuration service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Current configuration, seeded with the built-in default on first read
    async fn get_configuration(&self) -> AppResult<Configuration>;

    /// Validate and store a new partition (full replace of both steps)
    async fn replace_configuration(&self, proposed: Partition) -> AppResult<Configuration>;
}

/// Concrete implementation of ConfigService using repository.
pub struct ConfigManager {
    repo: Arc<dyn ConfigRepository>,
}

impl ConfigManager {
    /// Create new configuration service instance with repository
    pub fn new(repo: Arc<dyn ConfigRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ConfigService for ConfigManager {
    async fn get_configuration(&self) -> AppResult<Configuration> {
        self.repo.get_or_seed(Configuration::seed()).await
    }

    async fn replace_configuration(&self, proposed: Partition) -> AppResult<Configuration> {
        if let Err(e) = proposed.validate() {
            warn!(?proposed, "Rejected onboarding configuration: {}", e);
            return Err(e.into());
        }

        let stored = self.repo.replace(proposed).await?;
        info!(version = stored.version, "Onboarding configuration replaced");
        Ok(stored)
    }
}
