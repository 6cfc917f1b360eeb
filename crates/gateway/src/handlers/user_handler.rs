//! User onboarding handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{
    CurrentUserResponse, ProfileStep, ProfileUpdate, User, UserResponse, STEP_CREDENTIALS,
};

use crate::extractors::{set_session_cookie, validate, Session, ValidatedJson};
use crate::state::AppState;

/// Onboarding step submission, discriminated by `step`.
///
/// Step 1 carries `email` and `password`; steps 2 and 3 carry `data`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StepRequest {
    #[schema(example = 1)]
    pub step: i64,
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
    pub data: Option<ProfileUpdate>,
}

/// Step 1 fields
#[derive(Debug, Validate)]
pub struct Credentials {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A step submission after its shape has been checked
#[derive(Debug)]
pub enum StepSubmission {
    Register(Credentials),
    Profile(ProfileStep, ProfileUpdate),
}

impl TryFrom<StepRequest> for StepSubmission {
    type Error = AppError;

    fn try_from(request: StepRequest) -> Result<Self, Self::Error> {
        if request.step == i64::from(STEP_CREDENTIALS) {
            if request.data.is_some() {
                return Err(AppError::validation("Step 1 does not accept data"));
            }
            let credentials = Credentials {
                email: request
                    .email
                    .ok_or_else(|| AppError::validation("Email is required"))?,
                password: request.password.unwrap_or_default(),
            };
            validate(&credentials)?;
            return Ok(StepSubmission::Register(credentials));
        }

        let step = u8::try_from(request.step)
            .ok()
            .and_then(|n| ProfileStep::try_from(n).ok())
            .ok_or_else(|| AppError::validation("Invalid step"))?;

        if request.email.is_some() || request.password.is_some() {
            return Err(AppError::validation(format!(
                "Step {} does not accept email or password",
                step
            )));
        }

        Ok(StepSubmission::Profile(step, request.data.unwrap_or_default()))
    }
}

/// Outcome of any step submission
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub ok: bool,
    pub id: Uuid,
    #[schema(example = 2)]
    pub step_completed: u8,
}

impl From<&User> for StepResponse {
    fn from(user: &User) -> Self {
        Self {
            ok: true,
            id: user.id,
            step_completed: user.step_completed(),
        }
    }
}

/// Session user, `null` without a resolvable session
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: Option<CurrentUserResponse>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(submit_step))
        .route("/me", get(get_current_user))
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users with profile fields and progress", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.onboarding_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// User behind the session cookie
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current user, or null without a session", body = MeResponse)
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Session(session): Session,
) -> AppResult<Json<MeResponse>> {
    let user = state.onboarding_service.current_user(session).await?;
    Ok(Json(MeResponse {
        user: user.map(CurrentUserResponse::from),
    }))
}

/// Submit an onboarding step
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = StepRequest,
    security((), ("session_cookie" = [])),
    responses(
        (status = 200, description = "Step accepted; step 1 also sets the session cookie", body = StepResponse),
        (status = 400, description = "Malformed body, invalid step or field outside the step"),
        (status = 401, description = "No session for a step 2/3 submission"),
        (status = 404, description = "Session user no longer exists")
    )
)]
pub async fn submit_step(
    State(state): State<AppState>,
    Session(session): Session,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<StepRequest>,
) -> AppResult<(CookieJar, Json<StepResponse>)> {
    match StepSubmission::try_from(payload)? {
        StepSubmission::Register(credentials) => {
            let user = state
                .onboarding_service
                .register(credentials.email, credentials.password)
                .await?;
            let jar = set_session_cookie(jar, user.id, &state.session);
            Ok((jar, Json(StepResponse::from(&user))))
        }
        StepSubmission::Profile(step, update) => {
            let user = state
                .onboarding_service
                .submit_profile_data(session, step, update)
                .await?;
            Ok((jar, Json(StepResponse::from(&user))))
        }
    }
}
