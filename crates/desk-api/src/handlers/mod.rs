//! Route handlers
//!
//! All HTTP request handlers organized by page.

pub mod admin;
pub mod auth;
pub mod health;
pub mod home;
pub mod tickets;
pub mod uploads;

/// Paths that handlers redirect to
pub mod paths {
    pub const LOGIN: &str = crate::response::LOGIN_PATH;
    pub const REGISTER: &str = "/register";
    pub const DASHBOARD: &str = "/dashboard";
    pub const CREATE_TICKET: &str = "/create_ticket";
    pub const ADMIN: &str = "/admin";
}
