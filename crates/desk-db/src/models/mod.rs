//! Database models - SQLx-compatible structs for SQLite tables

mod session;
mod ticket;
mod user;

pub use session::SessionModel;
pub use ticket::{TicketModel, TicketWithOwnerModel};
pub use user::UserModel;
