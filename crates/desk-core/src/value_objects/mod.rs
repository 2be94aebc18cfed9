//! Value objects - immutable types that represent domain concepts

mod filename;
mod ids;
mod role;

pub use filename::{secure_filename, StoredFilename};
pub use ids::{IdParseError, TicketId, UserId};
pub use role::{require_role, Role, RoleParseError};
