//! Backend collaborator contract.
//!
//! The managed backend owns identities, their role claims and enrollments. The access layer
//! only needs the operations below; everything else (courses, lessons, notes, progress) is
//! a direct call-through that lives outside this crate.

use async_trait::async_trait;

pub mod enrollment_repo;
pub mod error;
pub mod identity_repo;
pub mod memory;

pub use enrollment_repo::PgEnrollmentRepo;
pub use error::{RepoError, RepoResult};
pub use identity_repo::PgIdentityRepo;
pub use memory::InMemoryBackend;

/// Role claims per identity, and lookup by email.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Record an identity the first time it is seen. Existing roles are left untouched.
    async fn ensure_identity(
        &self,
        uid: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> RepoResult<()>;

    /// Stored role claims, or `None` when the identity is unknown.
    async fn roles(&self, uid: &str) -> RepoResult<Option<Vec<String>>>;

    /// Replace the role claims. Returns `false` when the identity is unknown.
    async fn set_roles(&self, uid: &str, roles: &[String]) -> RepoResult<bool>;

    async fn find_uid_by_email(&self, email: &str) -> RepoResult<Option<String>>;

    /// Whether any identity currently holds the admin role.
    async fn any_admin(&self) -> RepoResult<bool>;
}

/// Enrollment relationship between an identity and a course.
#[async_trait]
pub trait EnrollmentStore: Send + Sync + 'static {
    async fn list_course_ids(&self, uid: &str) -> RepoResult<Vec<String>>;

    /// Returns `true` when a new enrollment was created.
    async fn enroll(&self, uid: &str, course_id: &str) -> RepoResult<bool>;

    /// Returns `true` when an enrollment was removed.
    async fn unenroll(&self, uid: &str, course_id: &str) -> RepoResult<bool>;

    async fn is_enrolled(&self, uid: &str, course_id: &str) -> RepoResult<bool>;
}
