use std::collections::BTreeMap;

use axum_extra::extract::cookie::CookieJar;

use crate::authz::Role;

use super::cookies::{AUTH_TOKEN_COOKIE, USER_ROLE_COOKIE, enrollment_cookie_name};

/// Read-only copy of the cookies a request arrived with.
///
/// The route gate decides on this alone, so two evaluations of the same snapshot always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieSnapshot {
    cookies: BTreeMap<String, String>,
}

impl CookieSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_jar(jar: &CookieJar) -> Self {
        Self {
            cookies: jar
                .iter()
                .map(|c| (c.name().to_string(), c.value().to_string()))
                .collect(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_authenticated(&self) -> bool {
        self.cookies.contains_key(AUTH_TOKEN_COOKIE)
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.cookies.contains_key(&enrollment_cookie_name(course_id))
    }

    /// Cached primary role. Missing, empty or unrecognised values count as the default role.
    pub fn primary_role(&self) -> Role {
        self.get(USER_ROLE_COOKIE)
            .and_then(|v| v.parse().ok())
            .unwrap_or(Role::DEFAULT)
    }
}
