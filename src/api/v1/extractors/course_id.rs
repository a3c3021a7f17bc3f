/*
 * Responsibility
 * - Path の course id を検証済みの型として受ける
 * - course id は cookie 名 (`enrolled-{courseId}`) にもなるため、使える文字を絞る
 * - 失敗時は 400 (INVALID_COURSE_ID)
 */
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

const MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseId(pub String);

impl CourseId {
    /// ASCII alphanumerics, `-` and `_`; 1..=128 chars.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::bad_request(
                "INVALID_COURSE_ID",
                "course id must be 1-128 characters of [A-Za-z0-9_-]",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for CourseId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_COURSE_ID", "missing course id"))?;
        Self::parse(&raw)
    }
}
