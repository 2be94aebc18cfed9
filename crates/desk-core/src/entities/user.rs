//! User entity - an account that can file tickets

use serde::Serialize;

use crate::value_objects::{Role, UserId};

/// User entity. The password hash is deliberately not part of it; it is only
/// ever read through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Check if the user holds the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this user may read a ticket owned by `owner`
    pub fn can_view_ticket_of(&self, owner: UserId) -> bool {
        self.id == owner || self.is_admin()
    }
}

/// Values needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    /// Create a regular account
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            role: Role::User,
        }
    }

    /// Override the role
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
