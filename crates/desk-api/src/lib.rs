//! # desk-api
//!
//! HTTP surface of the help desk built with the Axum framework.

pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
