//! Response types and error handling for page handlers
//!
//! Authentication failures become redirects to the login page, role failures
//! become a plain `403 Access denied`, everything else is a JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use desk_common::AppError;
use desk_core::DomainError;
use desk_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Where unauthenticated requests are sent
pub const LOGIN_PATH: &str = "/login";

/// Body of every role-gate denial
pub const ACCESS_DENIED_BODY: &str = "Access denied";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("No active session")]
    Unauthenticated,

    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => AppError::status_code_for(e),
            Self::Unauthenticated => return StatusCode::SEE_OTHER,
            Self::InvalidForm(_) => return StatusCode::BAD_REQUEST,
            Self::NotFound => return StatusCode::NOT_FOUND,
            Self::Internal(_) => return StatusCode::INTERNAL_SERVER_ERROR,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidForm(_) => "INVALID_FORM",
            Self::NotFound => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error came from the role gate
    fn is_access_denied(&self) -> bool {
        match self {
            Self::Domain(e) | Self::Service(ServiceError::Domain(e)) => e.is_authorization(),
            Self::App(AppError::Domain(e)) => e.is_authorization(),
            _ => false,
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid form error
    pub fn invalid_form(msg: impl Into<String>) -> Self {
        Self::InvalidForm(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Unauthenticated) {
            return Redirect::to(LOGIN_PATH).into_response();
        }
        if self.is_access_denied() {
            return (StatusCode::FORBIDDEN, ACCESS_DENIED_BODY).into_response();
        }

        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
