//! Onboarding progress state machine.
//!
//! Progress is a monotonic "highest step completed" counter:
//!
//! ```text
//! Registered(1) --step 2--> ProfilePartial(2) --step 3--> ProfileComplete(3)
//!      \______________________step 3_______________________/
//! ```
//!
//! Submitting an earlier step never moves progress backwards and
//! `ProfileComplete` is absorbing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{STEP_CREDENTIALS, STEP_PROFILE_FIRST, STEP_PROFILE_SECOND};
use crate::error::{DomainError, DomainResult};

/// How far a user has progressed through onboarding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum OnboardingState {
    /// Credentials stored (step 1 done)
    #[default]
    Registered,
    /// Step 2 profile data submitted
    ProfilePartial,
    /// Step 3 profile data submitted
    ProfileComplete,
}

impl OnboardingState {
    /// Highest step completed, as stored and reported
    pub fn step_completed(self) -> u8 {
        match self {
            OnboardingState::Registered => STEP_CREDENTIALS,
            OnboardingState::ProfilePartial => STEP_PROFILE_FIRST,
            OnboardingState::ProfileComplete => STEP_PROFILE_SECOND,
        }
    }

    /// State after submitting a profile step.
    pub fn advance(self, step: ProfileStep) -> Self {
        self.max(step.completes())
    }
}

impl From<OnboardingState> for u8 {
    fn from(state: OnboardingState) -> Self {
        state.step_completed()
    }
}

impl TryFrom<u8> for OnboardingState {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            STEP_CREDENTIALS => Ok(OnboardingState::Registered),
            STEP_PROFILE_FIRST => Ok(OnboardingState::ProfilePartial),
            STEP_PROFILE_SECOND => Ok(OnboardingState::ProfileComplete),
            other => Err(DomainError::internal(format!(
                "Stored step counter out of range: {}",
                other
            ))),
        }
    }
}

impl TryFrom<i16> for OnboardingState {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| DomainError::internal(format!("Stored step counter out of range: {}", value)))
            .and_then(OnboardingState::try_from)
    }
}

impl fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step_completed())
    }
}

/// One of the two admin-configurable profile steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileStep {
    /// Step 2
    Second,
    /// Step 3
    Third,
}

impl ProfileStep {
    /// Step number as seen by clients
    pub fn number(self) -> u8 {
        match self {
            ProfileStep::Second => STEP_PROFILE_FIRST,
            ProfileStep::Third => STEP_PROFILE_SECOND,
        }
    }

    /// Progress reached once this step is submitted
    pub fn completes(self) -> OnboardingState {
        match self {
            ProfileStep::Second => OnboardingState::ProfilePartial,
            ProfileStep::Third => OnboardingState::ProfileComplete,
        }
    }
}

impl TryFrom<u8> for ProfileStep {
    type Error = DomainError;

    fn try_from(value: u8) -> DomainResult<Self> {
        match value {
            STEP_PROFILE_FIRST => Ok(ProfileStep::Second),
            STEP_PROFILE_SECOND => Ok(ProfileStep::Third),
            _ => Err(DomainError::validation("Invalid step")),
        }
    }
}

impl fmt::Display for ProfileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
