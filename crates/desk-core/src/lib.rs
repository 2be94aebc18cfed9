//! # desk-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewTicket, NewUser, Session, Ticket, TicketWithOwner, User, DEFAULT_TICKET_STATUS};
pub use error::DomainError;
pub use traits::{RepoResult, SessionRepository, TicketRepository, UserRepository};
pub use value_objects::{
    require_role, secure_filename, IdParseError, Role, RoleParseError, StoredFilename, TicketId,
    UserId,
};
