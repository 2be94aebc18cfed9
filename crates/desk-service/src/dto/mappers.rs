//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use desk_core::entities::{Ticket, TicketWithOwner, User};

use super::responses::{AdminTicketResponse, TicketResponse, UserSummary};

/// Route prefix that serves stored attachments
pub const UPLOADS_PREFIX: &str = "/uploads";

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        let attachment = ticket.attachment.as_ref().map(ToString::to_string);
        Self {
            id: ticket.id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status.clone(),
            date_created: ticket.date_created,
            attachment_url: attachment
                .as_ref()
                .map(|name| format!("{UPLOADS_PREFIX}/{name}")),
            attachment,
            user_id: ticket.user_id,
        }
    }
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self::from(&ticket)
    }
}

impl From<TicketWithOwner> for AdminTicketResponse {
    fn from(row: TicketWithOwner) -> Self {
        Self {
            ticket: TicketResponse::from(&row.ticket),
            owner_username: row.owner_username,
        }
    }
}
