//! Claims resolver: role claims in, effective permission set out.
//!
//! Raw role strings come from an externally issued token, so they are kept as-is and only
//! parsed into [`Role`] when expanding permissions. A string that is not a known role
//! contributes nothing.

use std::collections::BTreeSet;

use serde::Serialize;

use super::permission::Permission;
use super::role::Role;

/// Union of the permissions granted by each role string, without duplicates.
pub fn resolve<S: AsRef<str>>(roles: &[S]) -> BTreeSet<Permission> {
    let mut out = BTreeSet::new();

    for raw in roles {
        match raw.as_ref().parse::<Role>() {
            Ok(role) => out.extend(role.permissions().iter().copied()),
            Err(unknown) => {
                tracing::debug!(role = %unknown.0, "ignoring unknown role claim");
            }
        }
    }

    out
}

/// Roles that drive permissions and routing for an identity.
///
/// Unknown role strings are dropped; an identity left with no known role is a student.
/// Order and duplicates of the input are preserved for the known roles so that the first
/// one stays the primary role.
pub fn effective_roles<S: AsRef<str>>(roles: &[S]) -> Vec<Role> {
    let mut out: Vec<Role> = Vec::with_capacity(roles.len());
    for raw in roles {
        if let Ok(role) = raw.as_ref().parse::<Role>()
            && !out.contains(&role)
        {
            out.push(role);
        }
    }

    if out.is_empty() {
        out.push(Role::DEFAULT);
    }
    out
}

/// Resolved view of an identity's role claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Claims {
    roles: Vec<String>,
    permissions: BTreeSet<Permission>,
}

impl Claims {
    /// Resolve exactly the given roles.
    pub fn from_roles<S: AsRef<str>>(roles: &[S]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.as_ref().to_string()).collect(),
            permissions: resolve(roles),
        }
    }

    /// Resolve the claims an identity is presented with, applying the default role.
    pub fn for_identity<S: AsRef<str>>(roles: &[S]) -> Self {
        let effective = effective_roles(roles);
        let names: Vec<&str> = effective.iter().map(Role::as_str).collect();
        Self::from_roles(&names)
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    /// Role that the session mirror and the route gate key on: the highest-privilege
    /// recognised role (admin > instructor > student), so the cookie agrees with
    /// `is_admin` / `is_instructor`.
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.iter().filter_map(|r| r.parse::<Role>().ok()).max()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn has_all_permissions(&self, required: &[Permission]) -> bool {
        required.iter().all(|p| self.permissions.contains(p))
    }

    pub fn has_any_permission(&self, required: &[Permission]) -> bool {
        required.iter().any(|p| self.permissions.contains(p))
    }

    fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_instructor(&self) -> bool {
        self.has_role(Role::Instructor) || self.is_admin()
    }

    pub fn is_student(&self) -> bool {
        self.has_role(Role::Student) || self.roles.is_empty()
    }
}
