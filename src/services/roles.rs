//! Role assignment on stored identities.
//!
//! Each operation is a read-modify-write against the identity store with no locking.
//! Concurrent admins editing the same identity get last-writer-wins.

use crate::authz::Role;
use crate::error::AppError;
use crate::repos::IdentityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    /// Replace every role with this one.
    Replace(Role),
    /// Add the role, keeping the others.
    Add(Role),
    Remove(Role),
}

impl RoleChange {
    pub fn apply(self, current: &[String]) -> Vec<String> {
        match self {
            RoleChange::Replace(role) => vec![role.as_str().to_string()],
            RoleChange::Add(role) => {
                let mut roles = current.to_vec();
                if !roles.iter().any(|r| r == role.as_str()) {
                    roles.push(role.as_str().to_string());
                }
                roles
            }
            RoleChange::Remove(role) => current
                .iter()
                .filter(|r| r.as_str() != role.as_str())
                .cloned()
                .collect(),
        }
    }
}

pub async fn get_roles(store: &dyn IdentityStore, uid: &str) -> Result<Vec<String>, AppError> {
    store
        .roles(uid)
        .await?
        .ok_or_else(|| AppError::not_found("user"))
}

pub async fn change_roles(
    store: &dyn IdentityStore,
    uid: &str,
    change: RoleChange,
) -> Result<Vec<String>, AppError> {
    let current = get_roles(store, uid).await?;
    let next = change.apply(&current);

    if !store.set_roles(uid, &next).await? {
        return Err(AppError::not_found("user"));
    }

    tracing::info!(uid = %uid, change = ?change, roles = ?next, "role claims updated");
    Ok(next)
}
