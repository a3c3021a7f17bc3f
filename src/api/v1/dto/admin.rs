/*
 * Responsibility
 * - admin role 管理 / admin setup の request/response DTO
 * - validate() で形式チェックし、未知の role 名は 400 にする
 */
use serde::{Deserialize, Serialize};

use crate::authz::Role;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct RolesQuery {
    pub uid: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub uid: String,
    pub role: String,
}

impl RoleChangeRequest {
    pub fn validate(&self) -> Result<Role, AppError> {
        if self.uid.trim().is_empty() {
            return Err(AppError::bad_request("INVALID_UID", "uid is required"));
        }

        self.role
            .parse::<Role>()
            .map_err(|err| AppError::bad_request("UNKNOWN_ROLE", err.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub uid: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminSetupRequest {
    pub email: String,
}

impl AdminSetupRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || email.len() > 320 {
            return Err(AppError::bad_request(
                "INVALID_EMAIL",
                "a valid email address is required",
            ));
        }
        Ok(email)
    }
}
