use std::str::FromStr;
use std::time::Duration;

use bms_kernel::settings::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::error::Result;

/// Open a SQLite pool for the configured database, creating the file if needed.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool> {
    tracing::info!(
        target: "bms-db",
        url = %settings.url,
        max_connections = settings.max_connections,
        "opening database pool"
    );

    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Membership rows reference books and collections.
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// In-memory database on a single connection, so every query sees the same data.
pub async fn memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}
