//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment,
    RateLimitConfig, ServerConfig, SessionConfig, StorageConfig, MIN_SECRET_KEY_LEN,
};
