//! Axum extractors for request handling
//!
//! Custom extractors for the session user, the admin gate, forms and path ids.

mod auth;
mod form;
mod path;

pub use auth::{AdminUser, CurrentUser, SESSION_COOKIE};
pub use form::FormData;
pub use path::TicketIdPath;
