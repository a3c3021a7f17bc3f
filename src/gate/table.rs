//! Path classification for page navigations.

/// Reachable by anyone, signed in or not. Never redirected, so sign-in cannot loop.
pub const PUBLIC_PREFIXES: [&str; 4] = ["/signin", "/signup", "/forgot-password", "/reset-password"];

/// Exact paths that are always allowed (one-time setup flows).
pub const SPECIAL_ROUTES: [&str; 1] = ["/admin/setup"];

/// Require a signed-in session.
pub const PROTECTED_PREFIXES: [&str; 3] = ["/dashboard", "/instructor", "/profile"];

pub const INSTRUCTOR_PREFIX: &str = "/instructor";
pub const ADMIN_PREFIX: &str = "/admin";

/// Not page navigations; the gate lets them through untouched.
pub const PASSTHROUGH_PREFIXES: [&str; 4] = ["/api", "/static", "/public", "/favicon.ico"];

pub const SIGN_IN_PATH: &str = "/signin";
pub const ACCESS_DENIED_PATH: &str = "/access-denied";

/// `path` is `prefix` itself or lies below it (`/admin`, `/admin/users`, not `/administrator`).
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn matches_any(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| matches_prefix(path, p))
}

/// How the gate sees a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass<'a> {
    Passthrough,
    Public,
    Special,
    Gated(Gated<'a>),
}

/// Classification of a path that is neither public nor special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gated<'a> {
    pub protected: bool,
    /// Course id when the path is a lesson page.
    pub lesson_course: Option<&'a str>,
    pub instructor: bool,
    pub admin: bool,
}

impl Gated<'_> {
    pub fn requires_auth(&self) -> bool {
        self.protected || self.lesson_course.is_some() || self.instructor || self.admin
    }
}

/// `/courses/{courseId}/lesson/{lessonId}[/...]` → `courseId`.
pub fn lesson_course_id(path: &str) -> Option<&str> {
    let mut segments = path.trim_start_matches('/').split('/');

    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("courses"), Some(course), Some("lesson"), Some(lesson))
            if !course.is_empty() && !lesson.is_empty() =>
        {
            Some(course)
        }
        _ => None,
    }
}

pub fn classify(path: &str) -> RouteClass<'_> {
    if matches_any(path, &PASSTHROUGH_PREFIXES) {
        return RouteClass::Passthrough;
    }
    if matches_any(path, &PUBLIC_PREFIXES) {
        return RouteClass::Public;
    }
    if SPECIAL_ROUTES.contains(&path) {
        return RouteClass::Special;
    }

    RouteClass::Gated(Gated {
        protected: matches_any(path, &PROTECTED_PREFIXES),
        lesson_course: lesson_course_id(path),
        instructor: matches_prefix(path, INSTRUCTOR_PREFIX),
        admin: matches_prefix(path, ADMIN_PREFIX),
    })
}
