//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and cookie signing key.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use desk_common::{AppConfig, AppError, MIN_SECRET_KEY_LEN};
use desk_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Key for signed cookies
    key: Key,
}

impl AppState {
    /// Create a new AppState, deriving the cookie key from `SECRET_KEY`
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Result<Self, AppError> {
        let secret = config.session.secret_key.as_bytes();
        if secret.len() < MIN_SECRET_KEY_LEN {
            return Err(AppError::Config(format!(
                "SECRET_KEY must be at least {MIN_SECRET_KEY_LEN} bytes"
            )));
        }

        Ok(Self {
            service_context: Arc::new(service_context),
            key: Key::derive_from(secret),
            config: Arc::new(config),
        })
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the cookie signing key
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether cookies should carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.config.app.env.is_production()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("key", &"[redacted]")
            .finish()
    }
}
