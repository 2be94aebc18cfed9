//! SQLite implementation of TicketRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use desk_core::entities::{NewTicket, Ticket, TicketWithOwner};
use desk_core::error::DomainError;
use desk_core::traits::{RepoResult, TicketRepository};
use desk_core::value_objects::{StoredFilename, TicketId, UserId};

use crate::models::{TicketModel, TicketWithOwnerModel};

use super::error::map_db_error;

const TICKET_COLUMNS: &str = "id, title, description, status, date_created, attachment, user_id";

/// SQLite implementation of TicketRepository
#[derive(Clone)]
pub struct SqliteTicketRepository {
    pool: SqlitePool,
}

impl SqliteTicketRepository {
    /// Create a new SqliteTicketRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for SqliteTicketRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TicketId) -> RepoResult<Option<Ticket>> {
        let result = sqlx::query_as::<_, TicketModel>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Ticket::try_from).transpose()
    }

    #[instrument(skip(self, filename), fields(filename = %filename))]
    async fn find_by_attachment(&self, filename: &StoredFilename) -> RepoResult<Option<Ticket>> {
        let result = sqlx::query_as::<_, TicketModel>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket WHERE attachment = ? ORDER BY id LIMIT 1"
        ))
        .bind(filename.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Ticket::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, TicketModel>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket WHERE user_id = ? ORDER BY id"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Ticket::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<TicketWithOwner>> {
        let rows = sqlx::query_as::<_, TicketWithOwnerModel>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.date_created, t.attachment,
                   t.user_id, u.username AS owner_username
            FROM ticket t
            INNER JOIN "user" u ON u.id = t.user_id
            ORDER BY t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(TicketWithOwner::try_from).collect()
    }

    #[instrument(skip(self, ticket), fields(user_id = %ticket.user_id))]
    async fn create(&self, ticket: &NewTicket) -> RepoResult<Ticket> {
        let model = sqlx::query_as::<_, TicketModel>(&format!(
            r"
            INSERT INTO ticket (title, description, status, date_created, attachment, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {TICKET_COLUMNS}
            "
        ))
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(desk_core::DEFAULT_TICKET_STATUS)
        .bind(ticket.date_created)
        .bind(ticket.attachment.as_ref().map(StoredFilename::as_str))
        .bind(ticket.user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                DomainError::UserNotFound(ticket.user_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ticket::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: TicketId, status: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE ticket SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TicketNotFound(id));
        }

        Ok(())
    }
}
