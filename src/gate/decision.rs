//! The route gate decision.
//!
//! A pure function of (path, cookie snapshot). It never calls the backend: cookies are
//! client-controlled, so this only keeps honest users from wandering into pages they cannot
//! use. The authoritative checks sit on the API endpoints that actually read or mutate data.

use url::form_urlencoded;

use crate::authz::Role;
use crate::session::CookieSnapshot;

use super::table::{ACCESS_DENIED_PATH, RouteClass, SIGN_IN_PATH, classify};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(Redirect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// No session: go sign in, then come back to `callback`.
    SignIn { callback: String },
    /// Lesson page for a course the client holds no enrollment flag for.
    EnrollmentRequired { course_id: String },
    AccessDenied,
}

impl Redirect {
    /// Location the client is sent to, query string included.
    pub fn location(&self) -> String {
        match self {
            Redirect::SignIn { callback } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("callbackUrl", callback)
                    .finish();
                format!("{SIGN_IN_PATH}?{query}")
            }
            Redirect::EnrollmentRequired { course_id } => {
                format!("/courses/{course_id}?enrollmentRequired=true")
            }
            Redirect::AccessDenied => ACCESS_DENIED_PATH.to_string(),
        }
    }
}

/// Decide one navigation. First matching rule wins.
pub fn evaluate(path: &str, cookies: &CookieSnapshot) -> GateDecision {
    let gated = match classify(path) {
        RouteClass::Passthrough | RouteClass::Public | RouteClass::Special => {
            return GateDecision::Allow;
        }
        RouteClass::Gated(gated) => gated,
    };

    if gated.requires_auth() && !cookies.is_authenticated() {
        return GateDecision::Redirect(Redirect::SignIn {
            callback: path.to_string(),
        });
    }

    if let Some(course_id) = gated.lesson_course
        && !cookies.is_enrolled(course_id)
    {
        return GateDecision::Redirect(Redirect::EnrollmentRequired {
            course_id: course_id.to_string(),
        });
    }

    let role = cookies.primary_role();

    if gated.instructor && !role.is_instructor_or_admin() {
        return GateDecision::Redirect(Redirect::AccessDenied);
    }

    if gated.admin && role != Role::Admin {
        return GateDecision::Redirect(Redirect::AccessDenied);
    }

    GateDecision::Allow
}
