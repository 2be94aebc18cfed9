//! User roles and the single authorization predicate used by every gated route

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::User;
use crate::error::DomainError;

/// Role tag stored on each user row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Column value for this role
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Whether a holder of this role may act where `required` is demanded
    pub const fn permits(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => matches!(self, Role::Admin),
        }
    }

    #[inline]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string read from storage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Check that `user` holds `required`
///
/// # Errors
/// Returns `DomainError::AccessDenied` when the user's role does not permit it
pub fn require_role(user: &User, required: Role) -> Result<(), DomainError> {
    if user.role.permits(required) {
        Ok(())
    } else {
        Err(DomainError::AccessDenied { required })
    }
}
