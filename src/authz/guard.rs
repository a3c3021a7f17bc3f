//! Render-time permission guard.
//!
//! The UI asks the guard what to show for a subtree. Nothing here renders; the caller
//! supplies the children and an optional fallback and gets back exactly one of them, or
//! the loading state while claims are still being fetched.

use super::claims::Claims;
use super::permission::Permission;

/// How a list of permissions combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    All,
    #[default]
    Any,
}

/// What a guarded subtree needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement {
    pub permission: Option<Permission>,
    pub permissions: Vec<Permission>,
    pub combinator: Combinator,
}

impl Requirement {
    pub fn single(permission: Permission) -> Self {
        Self {
            permission: Some(permission),
            ..Self::default()
        }
    }

    pub fn all(permissions: impl Into<Vec<Permission>>) -> Self {
        Self {
            permission: None,
            permissions: permissions.into(),
            combinator: Combinator::All,
        }
    }

    pub fn any(permissions: impl Into<Vec<Permission>>) -> Self {
        Self {
            permission: None,
            permissions: permissions.into(),
            combinator: Combinator::Any,
        }
    }

    /// An empty list adds no constraint; a single permission and a list must both hold.
    pub fn is_satisfied_by(&self, claims: &Claims) -> bool {
        if let Some(p) = self.permission
            && !claims.has_permission(p)
        {
            return false;
        }

        if self.permissions.is_empty() {
            return true;
        }

        match self.combinator {
            Combinator::All => claims.has_all_permissions(&self.permissions),
            Combinator::Any => claims.has_any_permission(&self.permissions),
        }
    }
}

/// Claims as seen by a component: either still loading or resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsState {
    Loading,
    Ready(Claims),
}

/// Outcome of evaluating the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Loading,
    Children(T),
    Fallback(T),
    Nothing,
}

impl<T> Gated<T> {
    pub fn into_content(self) -> Option<T> {
        match self {
            Gated::Children(t) | Gated::Fallback(t) => Some(t),
            Gated::Loading | Gated::Nothing => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PermissionGate {
    requirement: Requirement,
}

impl PermissionGate {
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement }
    }

    /// Pick what to render. `children` and `fallback` are only invoked for the branch taken.
    pub fn render<T>(
        &self,
        state: &ClaimsState,
        children: impl FnOnce() -> T,
        fallback: Option<impl FnOnce() -> T>,
    ) -> Gated<T> {
        let claims = match state {
            ClaimsState::Loading => return Gated::Loading,
            ClaimsState::Ready(claims) => claims,
        };

        if self.requirement.is_satisfied_by(claims) {
            Gated::Children(children())
        } else {
            match fallback {
                Some(f) => Gated::Fallback(f()),
                None => Gated::Nothing,
            }
        }
    }
}
