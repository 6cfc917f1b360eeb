//! API Gateway Library
//!
//! HTTP REST surface of the onboarding flow. Services run in-process on a
//! shared database connection pool.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use onboarding_service_lib::infra::Database;
use onboarding_service_lib::service::Services;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the application state over an open database.
pub fn build_state(database: Database, config: &GatewayConfig) -> AppState {
    let services = Services::from_connection(database.get_connection());
    AppState::new(&services, database, config.session.clone())
}

/// Connect, migrate and serve HTTP until the listener fails.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;
    let state = build_state(database, &config);

    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Onboarding API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
