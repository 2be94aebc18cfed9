//! # desk-common
//!
//! Shared utilities including configuration, error handling, password hashing,
//! session tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_session_token, hash_password, verify_dummy, verify_password,
    SESSION_TOKEN_BYTES,
};
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment,
    RateLimitConfig, ServerConfig, SessionConfig, StorageConfig, MIN_SECRET_KEY_LEN,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing_with_config, LogFormat, TracingConfig, TracingError};
