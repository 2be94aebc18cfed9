//! Failures raised by domain rules and repositories

use thiserror::Error;

use crate::value_objects::{Role, TicketId, UserId};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// Unknown name, or a ticket the caller may not see
    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("Access denied: requires {required} role")]
    AccessDenied { required: Role },

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    /// Driver failure or a row that no longer maps onto an entity
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Stable code for JSON error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::TicketNotFound(_) => "UNKNOWN_TICKET",
            Self::AttachmentNotFound(_) => "UNKNOWN_ATTACHMENT",
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::TicketNotFound(_) | Self::AttachmentNotFound(_)
        )
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Uniqueness violations, reported back on the form that caused them
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::UsernameAlreadyExists)
    }
}
