//! Error handling utilities for repositories

use desk_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
///
/// `on_unique` receives the driver message, which names the violated column
/// (`UNIQUE constraint failed: user.email`).
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(&str) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.message());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Unique violation on the `user` table
pub fn user_conflict(message: &str) -> DomainError {
    if message.contains("username") {
        DomainError::UsernameAlreadyExists
    } else {
        DomainError::EmailAlreadyExists
    }
}
