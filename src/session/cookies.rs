//! Cookie names and builders for the session mirror.
//!
//! These cookies are copies of server-asserted facts, kept so that page routing can be
//! decided without a backend call. They are hints: anything that mutates or reads protected
//! data re-checks against the verified token or the backend.

use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration;

/// Presence means "authenticated"; the value is the identity provider's ID token.
pub const AUTH_TOKEN_COOKIE: &str = "firebase-auth-token";

/// Primary role of the signed-in identity.
pub const USER_ROLE_COOKIE: &str = "user-role";

/// Prefix of the per-course enrollment flags (`enrolled-{courseId}`).
pub const ENROLLED_PREFIX: &str = "enrolled-";

pub const ENROLLED_VALUE: &str = "true";

pub fn enrollment_cookie_name(course_id: &str) -> String {
    format!("{ENROLLED_PREFIX}{course_id}")
}

/// Attributes and lifetimes applied to every mirror cookie.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub session_ttl: Duration,
    pub enrollment_ttl: Duration,
}

impl CookiePolicy {
    pub fn new(secure: bool, session_days: i64, enrollment_days: i64) -> Self {
        Self {
            secure,
            session_ttl: Duration::days(session_days),
            enrollment_ttl: Duration::days(enrollment_days),
        }
    }

    fn build(&self, name: String, value: String, ttl: Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(ttl)
            .build()
    }

    pub fn auth_token(&self, id_token: &str) -> Cookie<'static> {
        self.build(
            AUTH_TOKEN_COOKIE.to_string(),
            id_token.to_string(),
            self.session_ttl,
        )
    }

    pub fn user_role(&self, role: &str) -> Cookie<'static> {
        self.build(
            USER_ROLE_COOKIE.to_string(),
            role.to_string(),
            self.session_ttl,
        )
    }

    pub fn enrolled(&self, course_id: &str) -> Cookie<'static> {
        self.build(
            enrollment_cookie_name(course_id),
            ENROLLED_VALUE.to_string(),
            self.enrollment_ttl,
        )
    }

    /// Cookie used to remove `name`; path must match the one used when setting it.
    pub fn removal(&self, name: impl Into<String>) -> Cookie<'static> {
        Cookie::build(name.into()).path("/").build()
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::new(true, 1, 30)
    }
}
