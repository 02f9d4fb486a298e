//! Authenticated actor types for the domain layer.
//!
//! These types represent the caller after authentication, with no
//! dependency on any particular auth provider. HTTP middleware populates
//! them and handlers enforce role checks against them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{UserId, ValidationError};

/// Platform role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Mentor,
    Admin,
}

impl UserRole {
    /// Parses a role from its wire representation.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "student" => Ok(UserRole::Student),
            "mentor" => Ok(UserRole::Mentor),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }

    /// Returns the wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Mentor => "mentor",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated caller identity used for authorization decisions.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Actor {
    /// Creates a new actor.
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Checks whether this actor has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Checks whether this actor is the given user.
    pub fn is_user(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
