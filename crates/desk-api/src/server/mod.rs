//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::{IpAddr, SocketAddr};

use axum::Router;
use chrono::Duration;
use desk_common::{AppConfig, AppError};
use desk_db::{create_pool, create_schema, DatabaseConfig};
use desk_service::{AttachmentStore, AuthService, ServiceContext};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let max_upload_bytes = state.config().storage.max_file_size_bytes();
    let router = apply_middleware(create_router(max_upload_bytes), &state.config().rate_limit)?;

    Ok(router.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// Opens the database and creates its tables, prepares the upload directory
/// and makes sure the configured administrator exists.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(url = %config.database.url, "Opening SQLite database...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    create_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database ready");

    let attachments = AttachmentStore::new(
        config.storage.upload_dir.clone(),
        config.storage.max_file_size_bytes(),
    );
    attachments.ensure_dir().await.map_err(|e| {
        AppError::Storage(format!(
            "Failed to create upload directory {}: {e}",
            config.storage.upload_dir.display()
        ))
    })?;

    let service_context = ServiceContext::builder()
        .pool(pool)
        .sqlite_repositories()
        .attachments(attachments)
        .session_ttl(Duration::seconds(config.session.ttl_seconds))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(admin) = &config.admin {
        AuthService::new(&service_context)
            .ensure_admin(admin)
            .await
            .map_err(AppError::from)?;
    }

    AppState::new(service_context, config)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses back the per-client rate limit when no proxy header is present
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let host: IpAddr = config
        .api
        .host
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST {}: {e}", config.api.host)))?;
    let addr = SocketAddr::new(host, config.api.port);

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
