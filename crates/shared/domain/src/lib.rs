//! Domain layer - Core onboarding entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the component registry, the partition rule, the onboarding state machine
//! and the user entity.

pub mod component;
pub mod constants;
pub mod error;
pub mod onboarding;
pub mod partition;
pub mod password;
pub mod session;
pub mod user;

pub use component::{Component, ALL_COMPONENTS};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use onboarding::{OnboardingState, ProfileStep};
pub use partition::{is_valid_partition, Configuration, Partition};
pub use password::Password;
pub use session::SessionContext;
pub use user::{CurrentUserResponse, ProfileFields, ProfileUpdate, User, UserResponse};
