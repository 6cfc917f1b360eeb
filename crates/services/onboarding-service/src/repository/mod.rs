//! Repository layer for data access.

mod config_repository;
pub mod entities;
mod user_repository;

pub use config_repository::{ConfigRepository, ConfigStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use config_repository::MockConfigRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
