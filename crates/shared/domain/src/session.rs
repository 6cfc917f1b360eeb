//! Session identity resolved at the request boundary.

use std::str::FromStr;

use uuid::Uuid;

/// Who the current request acts for, if anyone.
///
/// Built once from the session cookie and handed explicitly to every
/// onboarding operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    user_id: Option<Uuid>,
}

impl SessionContext {
    /// A request without a session
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// A request acting for the given user
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Resolve a session token. Malformed tokens yield an anonymous session.
    pub fn from_token(token: Option<&str>) -> Self {
        let user_id = token.and_then(|t| Uuid::from_str(t.trim()).ok());
        Self { user_id }
    }

    /// Token to hand back to the client for `user_id`
    pub fn issue_token(user_id: Uuid) -> String {
        user_id.to_string()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}
