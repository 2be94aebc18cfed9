//! Domain entities - core business objects

mod session;
mod ticket;
mod user;

pub use session::Session;
pub use ticket::{NewTicket, Ticket, TicketWithOwner, DEFAULT_TICKET_STATUS};
pub use user::{NewUser, User};
