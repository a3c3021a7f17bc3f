use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::permission::Permission;

/// Closed set of roles an identity can carry in its claims. Variants are declared in
/// privilege order, so `Ord` ranks `Admin` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Instructor, Role::Admin];

    /// Role granted to an identity that carries no recognised role claim.
    pub const DEFAULT: Role = Role::Student;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }

    /// Permissions granted by this role.
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;

        match self {
            Role::Student => &[CoursesView, LessonsView],
            Role::Instructor => &[
                CoursesView,
                CoursesCreate,
                CoursesEdit,
                LessonsView,
                LessonsCreate,
                LessonsEdit,
                LessonsDelete,
            ],
            Role::Admin => &Permission::ALL,
        }
    }

    /// True when this role passes an "instructor or better" check.
    pub fn is_instructor_or_admin(&self) -> bool {
        matches!(self, Role::Instructor | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "instructor" => Ok(Role::Instructor),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
