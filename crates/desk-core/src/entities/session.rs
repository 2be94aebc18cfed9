//! Session entity - server-side record of a logged-in browser

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::UserId;

/// Session entity keyed by the opaque token carried in the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session that lives for `ttl`
    pub fn new(id: String, user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the session has expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
