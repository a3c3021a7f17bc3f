/*
 * Responsibility
 * - 解決済み claims を UI (permission guard) に渡すための response DTO
 * - POST /session と GET /me/claims で共通
 */
use serde::Serialize;

use crate::authz::{Claims, Permission, Role};

#[derive(Debug, Serialize)]
pub struct ClaimsResponse {
    pub uid: String,
    pub roles: Vec<String>,
    pub primary_role: Role,
    pub permissions: Vec<Permission>,
    pub is_admin: bool,
    pub is_instructor: bool,
    pub is_student: bool,
}

impl ClaimsResponse {
    pub fn new(uid: &str, claims: &Claims) -> Self {
        Self {
            uid: uid.to_string(),
            roles: claims.roles().to_vec(),
            primary_role: claims.primary_role().unwrap_or(Role::DEFAULT),
            permissions: claims.permissions().iter().copied().collect(),
            is_admin: claims.is_admin(),
            is_instructor: claims.is_instructor(),
            is_student: claims.is_student(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub claims: ClaimsResponse,
    /// `null` when the enrollment flags could not be pre-populated.
    pub enrollments_mirrored: Option<usize>,
}
