//! Session cookie handling.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use common::SessionConfig;
use domain::{SessionContext, SECONDS_PER_DAY, SESSION_COOKIE_NAME, SESSION_COOKIE_PATH};

/// Session resolved from the `uid` cookie. Never rejects; a missing or
/// malformed cookie gives an anonymous session.
#[derive(Debug, Clone, Copy)]
pub struct Session(pub SessionContext);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE_NAME).map(|c| c.value());

        Ok(Session(SessionContext::from_token(token)))
    }
}

/// Set the session cookie for `user_id` on the jar.
pub fn set_session_cookie(jar: CookieJar, user_id: Uuid, config: &SessionConfig) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, SessionContext::issue_token(user_id)))
        .path(SESSION_COOKIE_PATH)
        .max_age(Duration::seconds(config.max_age_days * SECONDS_PER_DAY))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, Request};

    #[test]
    fn test_session_cookie_attributes() {
        let id = Uuid::new_v4();
        let jar = set_session_cookie(CookieJar::new(), id, &SessionConfig::default());
        let cookie = jar.get("uid").unwrap();

        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[tokio::test]
    async fn test_extracts_user_from_cookie() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .header(COOKIE, format!("theme=dark; uid={}", id))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let Session(session) = Session::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(session.user_id(), Some(id));
    }

    #[tokio::test]
    async fn test_garbage_cookie_is_anonymous() {
        let request = Request::builder()
            .header(COOKIE, "uid=not-a-uuid")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let Session(session) = Session::from_request_parts(&mut parts, &()).await.unwrap();

        assert!(session.is_anonymous());
    }
}
