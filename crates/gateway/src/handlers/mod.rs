//! HTTP handlers.

pub mod config_handler;
pub mod health_handler;
pub mod user_handler;

pub use config_handler::config_routes;
pub use health_handler::health_routes;
pub use user_handler::user_routes;
