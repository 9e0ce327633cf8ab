use bms_kernel::Migration;
use sqlx::SqlitePool;

use crate::error::{DbError, Result};

const BOOKKEEPING: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL DEFAULT (datetime('now')),
        PRIMARY KEY (module, id)
    )
"#;

/// Apply every migration not yet recorded in `_migrations`, each in its own
/// transaction. Returns how many were applied.
pub async fn migrate(pool: &SqlitePool, migrations: &[(String, Migration)]) -> Result<usize> {
    sqlx::query(BOOKKEEPING).execute(pool).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let done: Option<(String,)> =
            sqlx::query_as("SELECT id FROM _migrations WHERE module = ?1 AND id = ?2")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await?;
        if done.is_some() {
            tracing::debug!(target: "bms-db", module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let wrap = |source: sqlx::Error| DbError::Migration {
            module: module.clone(),
            id: migration.id.to_string(),
            source,
        };

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(wrap)?;
        sqlx::query("INSERT INTO _migrations (module, id) VALUES (?1, ?2)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(target: "bms-db", module = %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
