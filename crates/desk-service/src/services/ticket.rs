//! Ticket service
//!
//! Filing tickets, listing them, status changes and attachment access.

use std::path::PathBuf;

use desk_core::entities::{NewTicket, Ticket, TicketWithOwner, User};
use desk_core::value_objects::{require_role, Role, StoredFilename, TicketId};
use desk_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{validate_request, CreateTicketRequest, UpdateStatusRequest};

use super::attachment::Upload;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Ticket service
pub struct TicketService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TicketService<'a> {
    /// Create a new TicketService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a ticket for `user`, storing the attachment first if one was sent
    ///
    /// An upload with an empty client filename counts as no attachment.
    #[instrument(skip(self, user, request, upload), fields(user_id = %user.id))]
    pub async fn create(
        &self,
        user: &User,
        request: CreateTicketRequest,
        upload: Option<Upload>,
    ) -> ServiceResult<Ticket> {
        let request = request.normalized();
        validate_request(&request)?;

        let attachment = match upload.filter(|u| !u.client_filename.is_empty()) {
            Some(upload) => Some(self.ctx.attachments().save(&upload).await?),
            None => None,
        };

        let new_ticket = NewTicket::new(
            user.id,
            request.title,
            request.description,
            attachment.clone(),
        );

        match self.ctx.ticket_repo().create(&new_ticket).await {
            Ok(ticket) => {
                info!(ticket_id = %ticket.id, attachment = ticket.has_attachment(), "Ticket created");
                Ok(ticket)
            }
            Err(e) => {
                if let Some(name) = &attachment {
                    warn!(stored = %name, "Ticket insert failed, discarding attachment");
                    self.ctx.attachments().remove(name).await;
                }
                Err(e.into())
            }
        }
    }

    /// Tickets owned by `user`, oldest first
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn list_for_user(&self, user: &User) -> ServiceResult<Vec<Ticket>> {
        Ok(self.ctx.ticket_repo().list_by_owner(user.id).await?)
    }

    /// Every ticket with its owner's username (admin only)
    #[instrument(skip(self, admin), fields(user_id = %admin.id))]
    pub async fn list_all(&self, admin: &User) -> ServiceResult<Vec<TicketWithOwner>> {
        require_role(admin, Role::Admin)?;
        Ok(self.ctx.ticket_repo().list_all().await?)
    }

    /// Replace a ticket's status (admin only)
    #[instrument(skip(self, admin, request), fields(user_id = %admin.id))]
    pub async fn update_status(
        &self,
        admin: &User,
        ticket_id: TicketId,
        request: UpdateStatusRequest,
    ) -> ServiceResult<()> {
        require_role(admin, Role::Admin)?;

        let request = request.normalized();
        validate_request(&request)?;

        self.ctx
            .ticket_repo()
            .update_status(ticket_id, &request.status)
            .await?;

        info!(ticket_id = %ticket_id, status = %request.status, "Ticket status updated");
        Ok(())
    }

    /// Locate an attachment on disk for `user`
    ///
    /// Only the owning ticket's author or an admin may read it. Every failure,
    /// including a name that could never have been stored, is reported as not
    /// found so the caller cannot discover other users' files.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn open_attachment(&self, user: &User, raw_name: &str) -> ServiceResult<PathBuf> {
        let not_found = || DomainError::AttachmentNotFound(raw_name.to_string());

        let name = StoredFilename::parse(raw_name).ok_or_else(not_found)?;
        let ticket = self
            .ctx
            .ticket_repo()
            .find_by_attachment(&name)
            .await?
            .ok_or_else(not_found)?;

        if !user.can_view_ticket_of(ticket.user_id) {
            warn!(ticket_id = %ticket.id, "Attachment requested by non-owner");
            return Err(not_found().into());
        }

        if !self.ctx.attachments().exists(&name).await {
            warn!(ticket_id = %ticket.id, "Attachment missing on disk");
            return Err(not_found().into());
        }

        Ok(self.ctx.attachments().path_of(&name))
    }
}
