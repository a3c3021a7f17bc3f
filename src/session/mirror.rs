//! Writers of the session mirror.
//!
//! Every cookie the route gate reads is written here and nowhere else. Writes are
//! last-writer-wins: concurrent enroll/unenroll on the same course are not coordinated.

use axum_extra::extract::cookie::CookieJar;

use crate::authz::{Claims, Role};
use crate::repos::EnrollmentStore;
use crate::services::auth::{VerifiedIdentity, token_fingerprint};

use super::cookies::{AUTH_TOKEN_COOKIE, CookiePolicy, ENROLLED_PREFIX, USER_ROLE_COOKIE};

/// Result of mirroring a fresh sign-in.
#[derive(Debug)]
pub struct SignedIn {
    pub jar: CookieJar,
    pub claims: Claims,
    /// Number of enrollment flags written, or `None` when the listing failed.
    pub enrollments_mirrored: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionMirror {
    policy: CookiePolicy,
}

impl SessionMirror {
    pub fn new(policy: CookiePolicy) -> Self {
        Self { policy }
    }

    pub fn write_session(&self, jar: CookieJar, id_token: &str, primary: Role) -> CookieJar {
        jar.add(self.policy.auth_token(id_token))
            .add(self.policy.user_role(primary.as_str()))
    }

    pub fn mark_enrolled(&self, jar: CookieJar, course_id: &str) -> CookieJar {
        jar.add(self.policy.enrolled(course_id))
    }

    pub fn clear_enrolled(&self, jar: CookieJar, course_id: &str) -> CookieJar {
        jar.remove(self.policy.removal(super::enrollment_cookie_name(course_id)))
    }

    /// Remove the auth flag, the role and every enrollment flag the client sent.
    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        let enrolled: Vec<String> = jar
            .iter()
            .filter(|c| c.name().starts_with(ENROLLED_PREFIX))
            .map(|c| c.name().to_string())
            .collect();

        let mut jar = jar
            .remove(self.policy.removal(AUTH_TOKEN_COOKIE))
            .remove(self.policy.removal(USER_ROLE_COOKIE));

        for name in enrolled {
            jar = jar.remove(self.policy.removal(name));
        }
        jar
    }

    /// Mirror a verified sign-in.
    ///
    /// Pre-populating enrollment flags is best-effort: if the listing fails the session is
    /// still written and the failure is only logged.
    pub async fn sign_in(
        &self,
        jar: CookieJar,
        id_token: &str,
        identity: &VerifiedIdentity,
        enrollments: &dyn EnrollmentStore,
    ) -> SignedIn {
        let claims = Claims::for_identity(&identity.roles);
        let primary = claims.primary_role().unwrap_or(Role::DEFAULT);

        let mut jar = self.write_session(jar, id_token, primary);

        let enrollments_mirrored = match enrollments.list_course_ids(&identity.uid).await {
            Ok(course_ids) => {
                for course_id in &course_ids {
                    jar = self.mark_enrolled(jar, course_id);
                }
                Some(course_ids.len())
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    uid = %identity.uid,
                    "could not pre-populate enrollment cookies"
                );
                None
            }
        };

        tracing::info!(
            uid = %identity.uid,
            token = %token_fingerprint(id_token),
            role = %primary,
            enrollments = ?enrollments_mirrored,
            "session mirrored"
        );

        SignedIn {
            jar,
            claims,
            enrollments_mirrored,
        }
    }
}
