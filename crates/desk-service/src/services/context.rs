//! Service context - dependency container for services
//!
//! Holds the repositories, the attachment store and session settings needed by services.

use std::sync::Arc;

use chrono::Duration;
use desk_core::traits::{SessionRepository, TicketRepository, UserRepository};
use desk_db::{SqlitePool, SqliteSessionRepository, SqliteTicketRepository, SqliteUserRepository};

use super::attachment::AttachmentStore;
use super::error::{ServiceError, ServiceResult};

/// Default session lifetime (7 days)
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 604_800;

/// Service context containing all dependencies
///
/// This is the dependency container passed to every service. It provides:
/// - Database pool (for readiness checks)
/// - Repositories
/// - Attachment storage
/// - Session lifetime
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: SqlitePool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    session_repo: Arc<dyn SessionRepository>,

    // Storage
    attachments: Arc<AttachmentStore>,

    session_ttl: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: SqlitePool,
        user_repo: Arc<dyn UserRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        session_repo: Arc<dyn SessionRepository>,
        attachments: Arc<AttachmentStore>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            pool,
            user_repo,
            ticket_repo,
            session_repo,
            attachments,
            session_ttl,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Wire the SQLite repositories over one pool
    pub fn sqlite(pool: SqlitePool, attachments: AttachmentStore, session_ttl: Duration) -> Self {
        Self::new(
            pool.clone(),
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteTicketRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool)),
            Arc::new(attachments),
            session_ttl,
        )
    }

    // === Database Pool ===

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the ticket repository
    pub fn ticket_repo(&self) -> &dyn TicketRepository {
        self.ticket_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    // === Storage ===

    /// Get the attachment store
    pub fn attachments(&self) -> &AttachmentStore {
        self.attachments.as_ref()
    }

    /// Lifetime of a newly created session
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"SqlitePool")
            .field("repositories", &"...")
            .field("attachments", &self.attachments)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<SqlitePool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    ticket_repo: Option<Arc<dyn TicketRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    attachments: Option<Arc<AttachmentStore>>,
    session_ttl: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            ticket_repo: None,
            session_repo: None,
            attachments: None,
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECONDS),
        }
    }

    pub fn pool(mut self, pool: SqlitePool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Use the SQLite repositories over the pool given to `pool`
    pub fn sqlite_repositories(mut self) -> Self {
        if let Some(pool) = &self.pool {
            self.user_repo = Some(Arc::new(SqliteUserRepository::new(pool.clone())));
            self.ticket_repo = Some(Arc::new(SqliteTicketRepository::new(pool.clone())));
            self.session_repo = Some(Arc::new(SqliteSessionRepository::new(pool.clone())));
        }
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn ticket_repo(mut self, repo: Arc<dyn TicketRepository>) -> Self {
        self.ticket_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn attachments(mut self, store: AttachmentStore) -> Self {
        self.attachments = Some(Arc::new(store));
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.session_ttl <= Duration::zero() {
            return Err(ServiceError::validation("session_ttl must be positive"));
        }

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.ticket_repo
                .ok_or_else(|| ServiceError::validation("ticket_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.attachments
                .ok_or_else(|| ServiceError::validation("attachments is required"))?,
            self.session_ttl,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
