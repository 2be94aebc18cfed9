//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in desk-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod session;
mod ticket;
mod user;

pub use session::SqliteSessionRepository;
pub use ticket::SqliteTicketRepository;
pub use user::SqliteUserRepository;
