//! Ticket model -> entity mappers

use desk_core::entities::{Ticket, TicketWithOwner};
use desk_core::error::DomainError;
use desk_core::value_objects::{StoredFilename, TicketId, UserId};

use crate::models::{TicketModel, TicketWithOwnerModel};

impl TryFrom<TicketModel> for Ticket {
    type Error = DomainError;

    fn try_from(model: TicketModel) -> Result<Self, Self::Error> {
        let attachment = match model.attachment {
            Some(raw) => Some(StoredFilename::parse(&raw).ok_or_else(|| {
                DomainError::DatabaseError(format!(
                    "ticket {}: invalid attachment name {raw:?}",
                    model.id
                ))
            })?),
            None => None,
        };

        Ok(Ticket {
            id: TicketId::new(model.id),
            title: model.title,
            description: model.description,
            status: model.status,
            date_created: model.date_created,
            attachment,
            user_id: UserId::new(model.user_id),
        })
    }
}

impl TryFrom<TicketWithOwnerModel> for TicketWithOwner {
    type Error = DomainError;

    fn try_from(model: TicketWithOwnerModel) -> Result<Self, Self::Error> {
        Ok(TicketWithOwner {
            ticket: Ticket::try_from(model.ticket)?,
            owner_username: model.owner_username,
        })
    }
}
