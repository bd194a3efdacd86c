//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role a user holds on the platform.
///
/// Wire format: the PascalCase role name (`"PlatformAdmin"`, `"Teacher"`, ...),
/// both in JSON bodies and in the `role` claim of access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    PlatformAdmin,
    SchoolAdmin,
    Teacher,
    Parent,
    Student,
}

/// Roles that manage classes, students and assignments.
pub const STAFF: &[UserRole] = &[
    UserRole::PlatformAdmin,
    UserRole::SchoolAdmin,
    UserRole::Teacher,
];

/// Roles that administer a school or the whole platform.
pub const ADMINS: &[UserRole] = &[UserRole::PlatformAdmin, UserRole::SchoolAdmin];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlatformAdmin => "PlatformAdmin",
            Self::SchoolAdmin => "SchoolAdmin",
            Self::Teacher => "Teacher",
            Self::Parent => "Parent",
            Self::Student => "Student",
        }
    }

    pub fn is_any_of(self, roles: &[UserRole]) -> bool {
        roles.contains(&self)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PlatformAdmin" => Ok(Self::PlatformAdmin),
            "SchoolAdmin" => Ok(Self::SchoolAdmin),
            "Teacher" => Ok(Self::Teacher),
            "Parent" => Ok(Self::Parent),
            "Student" => Ok(Self::Student),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
