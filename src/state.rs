/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - identities / enrollments: backend collaborator (Postgres or in-memory)
 *   - verifier: ID token 検証
 *   - mirror: session mirror cookie の writer
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{EnrollmentStore, IdentityStore};
use crate::services::auth::IdTokenVerifier;
use crate::session::SessionMirror;

#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityStore>,
    pub enrollments: Arc<dyn EnrollmentStore>,
    pub verifier: Arc<IdTokenVerifier>,
    pub mirror: SessionMirror,
    /// One-time `/api/v1/admin/setup` is accepted only while this is on.
    pub admin_setup_enabled: bool,
}

impl AppState {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        verifier: Arc<IdTokenVerifier>,
        mirror: SessionMirror,
        admin_setup_enabled: bool,
    ) -> Self {
        Self {
            identities,
            enrollments,
            verifier,
            mirror,
            admin_setup_enabled,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("verifier", &self.verifier)
            .field("mirror", &self.mirror)
            .field("admin_setup_enabled", &self.admin_setup_enabled)
            .finish_non_exhaustive()
    }
}
