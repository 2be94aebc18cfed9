//! Response DTOs
//!
//! Pages are returned as JSON documents describing what a template would render:
//! the page name, pending flash messages and the page's data.

use chrono::{DateTime, Utc};
use desk_core::value_objects::{Role, TicketId, UserId};
use serde::Serialize;

// ============================================================================
// Entity Views
// ============================================================================

/// The signed-in user as shown in page headers
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// A ticket row
#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub date_created: DateTime<Utc>,
    pub attachment: Option<String>,
    /// Download link for the attachment, if any
    pub attachment_url: Option<String>,
    pub user_id: UserId,
}

/// A ticket row in the admin panel, with its owner
#[derive(Debug, Clone, Serialize)]
pub struct AdminTicketResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub owner_username: String,
}

// ============================================================================
// Pages
// ============================================================================

/// A page that shows a form (register, login, create ticket)
#[derive(Debug, Clone, Serialize)]
pub struct FormPage {
    pub page: &'static str,
    pub fields: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub messages: Vec<String>,
}

impl FormPage {
    pub fn register(messages: Vec<String>) -> Self {
        Self::new("register", &["username", "email", "password"], messages)
    }

    pub fn login(messages: Vec<String>) -> Self {
        Self::new("login", &["email", "password"], messages)
    }

    pub fn create_ticket(messages: Vec<String>) -> Self {
        Self::new("create_ticket", &["title", "description", "file"], messages)
    }

    fn new(page: &'static str, fields: &'static [&'static str], messages: Vec<String>) -> Self {
        Self {
            page,
            fields,
            error: None,
            messages,
        }
    }

    /// Attach an inline error shown above the form
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// The signed-in user's own tickets
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub page: &'static str,
    pub user: UserSummary,
    pub tickets: Vec<TicketResponse>,
    pub messages: Vec<String>,
}

impl DashboardPage {
    pub fn new(user: UserSummary, tickets: Vec<TicketResponse>, messages: Vec<String>) -> Self {
        Self {
            page: "dashboard",
            user,
            tickets,
            messages,
        }
    }
}

/// Every ticket in the system
#[derive(Debug, Clone, Serialize)]
pub struct AdminPage {
    pub page: &'static str,
    pub user: UserSummary,
    pub tickets: Vec<AdminTicketResponse>,
    pub messages: Vec<String>,
}

impl AdminPage {
    pub fn new(
        user: UserSummary,
        tickets: Vec<AdminTicketResponse>,
        messages: Vec<String>,
    ) -> Self {
        Self {
            page: "admin",
            user,
            tickets,
            messages,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub upload_dir: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, upload_dir_healthy: bool) -> Self {
        let all_healthy = database_healthy && upload_dir_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: health_label(database_healthy),
                upload_dir: health_label(upload_dir_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

fn health_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}
