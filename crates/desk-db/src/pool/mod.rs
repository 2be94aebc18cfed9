//! Database connection pool management

mod sqlite;

pub use sqlite::{create_pool, is_memory_url, DatabaseConfig};

// Re-export SqlitePool for convenience
pub use sqlx::sqlite::SqlitePool;
