//! Ticket entity - a support request filed by a user

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{StoredFilename, TicketId, UserId};

/// Status every ticket starts with
pub const DEFAULT_TICKET_STATUS: &str = "Open";

/// Ticket entity
///
/// `status` is free text: it starts as [`DEFAULT_TICKET_STATUS`] and an admin
/// may set it to any non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub date_created: DateTime<Utc>,
    pub attachment: Option<StoredFilename>,
    pub user_id: UserId,
}

impl Ticket {
    #[inline]
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Ticket joined with its owner's username, as listed on the admin panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketWithOwner {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub owner_username: String,
}

/// Values needed to insert a ticket row
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub attachment: Option<StoredFilename>,
    pub user_id: UserId,
    pub date_created: DateTime<Utc>,
}

impl NewTicket {
    /// New ticket stamped with the current time
    pub fn new(
        user_id: UserId,
        title: String,
        description: String,
        attachment: Option<StoredFilename>,
    ) -> Self {
        Self {
            title,
            description,
            attachment,
            user_id,
            date_created: Utc::now(),
        }
    }
}
