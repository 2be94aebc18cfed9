//! Request DTOs for form submissions
//!
//! Form fields default to empty strings so a missing field is reported by
//! validation rather than by the form decoder.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::services::{ServiceError, ServiceResult};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Username is required (max 100 characters)"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "Email is required (max 120 characters)"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Password is required (max 200 characters)"))]
    pub password: String,
}

impl RegisterRequest {
    /// Trim the identity fields; the password is taken verbatim
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

/// User login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Ticket Requests
// ============================================================================

/// New ticket fields (the optional file travels separately as an `Upload`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required (max 200 characters)"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl CreateTicketRequest {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Admin status change form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Status is required (max 50 characters)"))]
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn normalized(self) -> Self {
        Self {
            status: self.status.trim().to_string(),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a request, reporting the first failing field's message
///
/// Fields are visited in name order so the reported message is stable.
pub fn validate_request<T: Validate>(request: &T) -> ServiceResult<()> {
    request
        .validate()
        .map_err(|errors| ServiceError::validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .first()
        .and_then(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("Invalid {field}"), ToString::to_string)
            })
        })
        .unwrap_or_else(|| "Invalid input".to_string())
}
