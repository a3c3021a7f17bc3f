use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single allowed action on a single resource type.
///
/// Wire names follow the `resource:action` convention (`courses:edit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "courses:view")]
    CoursesView,
    #[serde(rename = "courses:create")]
    CoursesCreate,
    #[serde(rename = "courses:edit")]
    CoursesEdit,
    #[serde(rename = "courses:delete")]
    CoursesDelete,
    #[serde(rename = "lessons:view")]
    LessonsView,
    #[serde(rename = "lessons:create")]
    LessonsCreate,
    #[serde(rename = "lessons:edit")]
    LessonsEdit,
    #[serde(rename = "lessons:delete")]
    LessonsDelete,
    #[serde(rename = "users:view")]
    UsersView,
    #[serde(rename = "users:edit")]
    UsersEdit,
    #[serde(rename = "users:delete")]
    UsersDelete,
    #[serde(rename = "roles:manage")]
    RolesManage,
    #[serde(rename = "admin:access")]
    AdminAccess,
}

impl Permission {
    pub const ALL: [Permission; 13] = [
        Permission::CoursesView,
        Permission::CoursesCreate,
        Permission::CoursesEdit,
        Permission::CoursesDelete,
        Permission::LessonsView,
        Permission::LessonsCreate,
        Permission::LessonsEdit,
        Permission::LessonsDelete,
        Permission::UsersView,
        Permission::UsersEdit,
        Permission::UsersDelete,
        Permission::RolesManage,
        Permission::AdminAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CoursesView => "courses:view",
            Permission::CoursesCreate => "courses:create",
            Permission::CoursesEdit => "courses:edit",
            Permission::CoursesDelete => "courses:delete",
            Permission::LessonsView => "lessons:view",
            Permission::LessonsCreate => "lessons:create",
            Permission::LessonsEdit => "lessons:edit",
            Permission::LessonsDelete => "lessons:delete",
            Permission::UsersView => "users:view",
            Permission::UsersEdit => "users:edit",
            Permission::UsersDelete => "users:delete",
            Permission::RolesManage => "roles:manage",
            Permission::AdminAccess => "admin:access",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
