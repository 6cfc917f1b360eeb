//! Optional profile components an operator can place on step 2 or step 3.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A fixed, closed set of optional profile field groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Component {
    /// Free-form "about me" text
    AboutMe,
    /// Street, city, region and postal code
    Address,
    /// Date of birth
    Birthdate,
}

/// Every registered component, in display order.
pub const ALL_COMPONENTS: [Component; 3] =
    [Component::AboutMe, Component::Address, Component::Birthdate];

impl Component {
    /// Wire identifier of the component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::AboutMe => "ABOUT_ME",
            Component::Address => "ADDRESS",
            Component::Birthdate => "BIRTHDATE",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_COMPONENTS
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown component: {}", s)))
    }
}
