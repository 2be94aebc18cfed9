//! Schema bootstrap
//!
//! Tables are created on startup when missing; existing data is left alone.

use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "user" (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ticket (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Open',
        date_created TEXT NOT NULL,
        attachment TEXT,
        user_id INTEGER NOT NULL REFERENCES "user"(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS session (
        id TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES "user"(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        expires_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ticket_user_id ON ticket(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_ticket_attachment ON ticket(attachment)",
    "CREATE INDEX IF NOT EXISTS idx_session_user_id ON session(user_id)",
];

/// Create every table and index that does not exist yet
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Database schema ready");
    Ok(())
}
