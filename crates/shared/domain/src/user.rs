//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::Component;
use crate::constants::BIRTHDATE_FORMAT;
use crate::error::{DomainError, DomainResult};
use crate::onboarding::{OnboardingState, ProfileStep};
use crate::partition::Partition;

/// Optional profile values, each unset until the user supplies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub about_me: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile: ProfileFields,
    pub progress: OnboardingState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user (step 1 completed)
    pub fn new(id: Uuid, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            password_hash,
            profile: ProfileFields::default(),
            progress: OnboardingState::Registered,
            created_at: now,
            updated_at: now,
        }
    }

    /// Highest step completed
    pub fn step_completed(&self) -> u8 {
        self.progress.step_completed()
    }

    /// Merge a profile step submission and advance progress.
    ///
    /// Fields missing from `update` keep their previous value. The record is
    /// left untouched when the birthdate cannot be parsed.
    pub fn submit_profile(&mut self, step: ProfileStep, update: ProfileUpdate) -> DomainResult<()> {
        let birthdate = update.parsed_birthdate()?;

        let profile = &mut self.profile;
        if let Some(about_me) = update.about_me {
            profile.about_me = Some(about_me);
        }
        if let Some(street) = update.street {
            profile.street = Some(street);
        }
        if let Some(city) = update.city {
            profile.city = Some(city);
        }
        if let Some(region) = update.region {
            profile.region = Some(region);
        }
        if let Some(postal_code) = update.postal_code {
            profile.postal_code = Some(postal_code);
        }
        if birthdate.is_some() {
            profile.birthdate = birthdate;
        }

        self.progress = self.progress.advance(step);
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Partial profile data submitted on step 2 or step 3.
///
/// Absent (or `null`) fields are left unchanged. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[cfg_attr(feature = "openapi", schema(example = "I like hiking."))]
    pub about_me: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "1 Main St"))]
    pub street: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Springfield"))]
    pub city: Option<String>,
    /// Region / state
    #[serde(rename = "state")]
    #[cfg_attr(feature = "openapi", schema(example = "IL"))]
    pub region: Option<String>,
    /// Postal code
    #[serde(rename = "zip")]
    #[cfg_attr(feature = "openapi", schema(example = "62704"))]
    pub postal_code: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp; empty means unchanged
    #[cfg_attr(feature = "openapi", schema(example = "1990-04-01"))]
    pub birthdate: Option<String>,
}

impl ProfileUpdate {
    /// Wire name and owning component of every supplied field
    pub fn supplied_fields(&self) -> Vec<(&'static str, Component)> {
        [
            ("aboutMe", Component::AboutMe, self.about_me.is_some()),
            ("street", Component::Address, self.street.is_some()),
            ("city", Component::Address, self.city.is_some()),
            ("state", Component::Address, self.region.is_some()),
            ("zip", Component::Address, self.postal_code.is_some()),
            ("birthdate", Component::Birthdate, self.birthdate.is_some()),
        ]
        .into_iter()
        .filter(|(_, _, supplied)| *supplied)
        .map(|(name, component, _)| (name, component))
        .collect()
    }

    /// Reject fields whose component is not shown on `step`.
    pub fn check_scope(&self, partition: &Partition, step: ProfileStep) -> DomainResult<()> {
        let outside: Vec<&str> = self
            .supplied_fields()
            .into_iter()
            .filter(|(_, component)| !partition.displays(*component, step))
            .map(|(name, _)| name)
            .collect();

        if outside.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "Fields not collected on step {}: {}",
                step,
                outside.join(", ")
            )))
        }
    }

    /// Birthdate to store, `None` when absent or empty.
    pub fn parsed_birthdate(&self) -> DomainResult<Option<NaiveDate>> {
        let raw = match self.birthdate.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        if let Ok(date) = NaiveDate::parse_from_str(raw, BIRTHDATE_FORMAT) {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| Some(ts.date_naive()))
            .map_err(|_| DomainError::validation(format!("Invalid birthdate: {}", raw)))
    }
}

/// User listing entry (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address
    pub email: String,
    pub about_me: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "state")]
    pub region: Option<String>,
    #[serde(rename = "zip")]
    pub postal_code: Option<String>,
    pub birthdate: Option<NaiveDate>,
    /// Highest onboarding step completed (1-3)
    pub step_completed: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            step_completed: user.step_completed(),
            email: user.email,
            about_me: user.profile.about_me,
            street: user.profile.street,
            city: user.profile.city,
            region: user.profile.region,
            postal_code: user.profile.postal_code,
            birthdate: user.profile.birthdate,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile of the user behind the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub email: String,
    pub about_me: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "state")]
    pub region: Option<String>,
    #[serde(rename = "zip")]
    pub postal_code: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub step_completed: u8,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            step_completed: user.step_completed(),
            email: user.email,
            about_me: user.profile.about_me,
            street: user.profile.street,
            city: user.profile.city,
            region: user.profile.region,
            postal_code: user.profile.postal_code,
            birthdate: user.profile.birthdate,
        }
    }
}
