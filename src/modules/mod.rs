pub mod books;
pub mod collections;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use bms_db::SharedStorage;
use bms_http::AppError;
use bms_kernel::ModuleRegistry;

/// Register every BMS module with the registry, in mount order
pub fn register_all(registry: &mut ModuleRegistry, storage: SharedStorage) {
    registry.register(books::create_module(storage.clone()));
    registry.register(collections::create_module(storage));
}

/// A required request field, rejecting absent and blank values.
pub(crate) fn required<'a>(label: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::validation(format!("{} cannot be empty", label))),
    }
}

pub(crate) fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::validation(format!("Invalid request body: {}", rejection.body_text()))
}

pub(crate) fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::validation(format!("Invalid query parameters: {}", rejection.body_text()))
}

/// In-memory storage with every module's migrations applied.
#[cfg(test)]
pub(crate) async fn test_storage() -> SharedStorage {
    let pool = bms_db::memory_pool().await.unwrap();
    let storage = bms_db::SqliteStorage::new(pool.clone()).shared();
    let registry = crate::registry(storage.clone());
    bms_db::migrate(&pool, &registry.collect_migrations())
        .await
        .unwrap();
    storage
}
