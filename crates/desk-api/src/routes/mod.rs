//! Route definitions

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, auth, health, home, tickets, uploads};
use crate::state::AppState;

/// Room left in an upload request for the text fields and multipart framing
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the page router (excluding health for separate middleware handling)
pub fn create_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .merge(auth_routes())
        .merge(ticket_routes(max_upload_bytes))
        .merge(admin_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Registration and session routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Routes for signed-in users
fn ticket_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(tickets::dashboard))
        .route(
            "/create_ticket",
            get(tickets::create_ticket_page)
                .post(tickets::create_ticket)
                .layer(DefaultBodyLimit::max(max_upload_bytes + FORM_OVERHEAD_BYTES)),
        )
        .route("/uploads/:filename", get(uploads::download))
}

/// Admin-only routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::admin_panel))
        .route("/update_status/:id", post(admin::update_status))
}
