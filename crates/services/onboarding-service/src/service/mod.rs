//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories. They depend on
//! repository traits so they can be exercised with mocks.

mod config_service;
pub mod container;
mod onboarding_service;

pub use config_service::{ConfigManager, ConfigService};
pub use container::{ServiceContainer, Services};
pub use onboarding_service::{OnboardingManager, OnboardingService};

#[cfg(any(test, feature = "test-utils"))]
pub use config_service::MockConfigService;
#[cfg(any(test, feature = "test-utils"))]
pub use onboarding_service::MockOnboardingService;
