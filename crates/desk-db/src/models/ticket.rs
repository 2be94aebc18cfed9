//! Ticket database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `ticket` table
#[derive(Debug, Clone, FromRow)]
pub struct TicketModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub date_created: DateTime<Utc>,
    pub attachment: Option<String>,
    pub user_id: i64,
}

/// Ticket row joined with its owner's username (admin listing)
#[derive(Debug, Clone, FromRow)]
pub struct TicketWithOwnerModel {
    #[sqlx(flatten)]
    pub ticket: TicketModel,
    pub owner_username: String,
}
