//! Onboarding configuration handlers (admin page backend).

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{Component, Configuration, Partition};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Proposed assignment of components to steps 2 and 3
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigRequest {
    #[schema(example = json!(["ABOUT_ME", "ADDRESS"]))]
    pub step2: Vec<Component>,
    #[schema(example = json!(["BIRTHDATE"]))]
    pub step3: Vec<Component>,
}

impl From<ConfigRequest> for Partition {
    fn from(request: ConfigRequest) -> Self {
        Partition::new(request.step2, request.step3)
    }
}

/// Stored configuration
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub step2: Vec<Component>,
    pub step3: Vec<Component>,
    /// Incremented on every successful replacement
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<Configuration> for ConfigResponse {
    fn from(config: Configuration) -> Self {
        Self {
            step2: config.partition.step2,
            step3: config.partition.step3,
            version: config.version,
            updated_at: config.updated_at,
        }
    }
}

/// Create configuration routes
pub fn config_routes() -> Router<AppState> {
    Router::new().route("/", get(get_config).post(replace_config))
}

/// Current configuration (seeded with the default on first read)
#[utoipa::path(
    get,
    path = "/config",
    tag = "Configuration",
    responses(
        (status = 200, description = "Current step partition", body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<ConfigResponse>> {
    let config = state.config_service.get_configuration().await?;
    Ok(Json(ConfigResponse::from(config)))
}

/// Replace the step partition
#[utoipa::path(
    post,
    path = "/config",
    tag = "Configuration",
    request_body = ConfigRequest,
    responses(
        (status = 200, description = "Configuration stored", body = ConfigResponse),
        (status = 400, description = "Malformed body or invalid partition")
    )
)]
pub async fn replace_config(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ConfigRequest>,
) -> AppResult<Json<ConfigResponse>> {
    let config = state
        .config_service
        .replace_configuration(Partition::from(payload))
        .await?;
    Ok(Json(ConfigResponse::from(config)))
}
