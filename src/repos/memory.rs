//! In-memory backend for development and tests.
//!
//! Both stores share one instance so that a single `Arc<InMemoryBackend>` can be handed to
//! the identity and enrollment seams of `AppState`.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::authz::Role;
use crate::repos::error::RepoResult;
use crate::repos::{EnrollmentStore, IdentityStore};

#[derive(Debug, Clone, Default)]
struct IdentityRecord {
    email: Option<String>,
    roles: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    identities: RwLock<HashMap<String, IdentityRecord>>,
    enrollments: RwLock<HashMap<String, BTreeSet<String>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Case-insensitive like the `lower(email)` lookups of the Postgres store.
fn same_email(stored: Option<&str>, email: &str) -> bool {
    stored.is_some_and(|e| e.to_lowercase() == email.to_lowercase())
}

#[async_trait]
impl IdentityStore for InMemoryBackend {
    async fn ensure_identity(
        &self,
        uid: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> RepoResult<()> {
        let mut identities = self.identities.write().await;
        if let Some(email) = email {
            for (other, record) in identities.iter_mut() {
                if other != uid && same_email(record.email.as_deref(), email) {
                    record.email = None;
                }
            }
        }

        let record = identities
            .entry(uid.to_string())
            .or_insert_with(|| IdentityRecord {
                email: None,
                roles: roles.to_vec(),
            });
        if let Some(email) = email {
            record.email = Some(email.to_string());
        }
        Ok(())
    }

    async fn roles(&self, uid: &str) -> RepoResult<Option<Vec<String>>> {
        let identities = self.identities.read().await;
        Ok(identities.get(uid).map(|r| r.roles.clone()))
    }

    async fn set_roles(&self, uid: &str, roles: &[String]) -> RepoResult<bool> {
        let mut identities = self.identities.write().await;
        match identities.get_mut(uid) {
            Some(record) => {
                record.roles = roles.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_uid_by_email(&self, email: &str) -> RepoResult<Option<String>> {
        let identities = self.identities.read().await;
        Ok(identities
            .iter()
            .find(|(_, r)| same_email(r.email.as_deref(), email))
            .map(|(uid, _)| uid.clone()))
    }

    async fn any_admin(&self) -> RepoResult<bool> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .any(|r| r.roles.iter().any(|role| role == Role::Admin.as_str())))
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryBackend {
    async fn list_course_ids(&self, uid: &str) -> RepoResult<Vec<String>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .get(uid)
            .map(|courses| courses.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn enroll(&self, uid: &str, course_id: &str) -> RepoResult<bool> {
        let mut enrollments = self.enrollments.write().await;
        Ok(enrollments
            .entry(uid.to_string())
            .or_default()
            .insert(course_id.to_string()))
    }

    async fn unenroll(&self, uid: &str, course_id: &str) -> RepoResult<bool> {
        let mut enrollments = self.enrollments.write().await;
        Ok(enrollments
            .get_mut(uid)
            .is_some_and(|courses| courses.remove(course_id)))
    }

    async fn is_enrolled(&self, uid: &str, course_id: &str) -> RepoResult<bool> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .get(uid)
            .is_some_and(|courses| courses.contains(course_id)))
    }
}
