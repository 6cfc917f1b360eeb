//! SeaORM entities.

pub mod onboarding_config;
pub mod user;
