//! Session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `session` table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub id: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
