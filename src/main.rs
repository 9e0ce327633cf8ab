use anyhow::Context;
use bms_db::SqliteStorage;
use bms_kernel::{settings::Settings, InitCtx};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load BMS settings")?;
    bms_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "bms-server bootstrap starting"
    );

    let pool = bms_db::connect(&settings.database)
        .await
        .context("failed to open database")?;
    let registry = bms::registry(SqliteStorage::new(pool.clone()).shared());
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    let applied = bms_db::migrate(&pool, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations complete");
    registry.start_modules(&ctx).await?;

    let served = bms_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    pool.close().await;
    tracing::info!("bms-server shut down");

    served
}
