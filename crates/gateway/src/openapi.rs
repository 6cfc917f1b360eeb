//! OpenAPI documentation.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::config_handler::{ConfigRequest, ConfigResponse};
use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::handlers::user_handler::{MeResponse, StepRequest, StepResponse};
use domain::{Component, CurrentUserResponse, ProfileUpdate, UserResponse, SESSION_COOKIE_NAME};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::config_handler::get_config,
        crate::handlers::config_handler::replace_config,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_current_user,
        crate::handlers::user_handler::submit_step,
    ),
    components(
        schemas(
            Component,
            ConfigRequest,
            ConfigResponse,
            StepRequest,
            StepResponse,
            ProfileUpdate,
            MeResponse,
            CurrentUserResponse,
            UserResponse,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Configuration", description = "Admin assignment of components to steps"),
        (name = "Users", description = "Onboarding flow and user listing"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
