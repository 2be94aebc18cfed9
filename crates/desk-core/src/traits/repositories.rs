//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewTicket, NewUser, Session, Ticket, TicketWithOwner, User};
use crate::error::DomainError;
use crate::value_objects::{Role, StoredFilename, TicketId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (the login identifier)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Insert a user and return it with its generated id
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Change a user's role
    async fn set_role(&self, id: UserId, role: Role) -> RepoResult<()>;
}

// ============================================================================
// Ticket Repository
// ============================================================================

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Find ticket by ID
    async fn find_by_id(&self, id: TicketId) -> RepoResult<Option<Ticket>>;

    /// Find the ticket that owns a stored attachment
    async fn find_by_attachment(&self, filename: &StoredFilename) -> RepoResult<Option<Ticket>>;

    /// List tickets owned by a user, oldest first
    async fn list_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Ticket>>;

    /// List every ticket with its owner's username, oldest first
    async fn list_all(&self) -> RepoResult<Vec<TicketWithOwner>>;

    /// Insert a ticket and return it with its generated id
    async fn create(&self, ticket: &NewTicket) -> RepoResult<Ticket>;

    /// Set a ticket's status
    async fn update_status(&self, id: TicketId, status: &str) -> RepoResult<()>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    async fn create(&self, session: &Session) -> RepoResult<()>;

    /// Find a session by token, ignoring expired ones
    async fn find_valid(&self, id: &str) -> RepoResult<Option<Session>>;

    /// Delete a session (logout)
    async fn delete(&self, id: &str) -> RepoResult<()>;

    /// Remove every expired session, returning how many were deleted
    async fn delete_expired(&self) -> RepoResult<u64>;
}
