mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{delete, get, post},
    Router,
};
use bms_db::{schema, SharedStorage};
use bms_kernel::{InitCtx, Migration, Module};

/// Named groups of books and their memberships
pub struct CollectionsModule {
    storage: SharedStorage,
}

impl CollectionsModule {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Module for CollectionsModule {
    fn name(&self) -> &'static str {
        "collection"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "collection module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/create", post(handlers::create_collection))
            .route("/remove", delete(handlers::remove_collection))
            .route("/list", get(handlers::list_collections))
            .route("/list/books", get(handlers::list_collection_books))
            .route("/add-book", post(handlers::add_book))
            .route("/remove-book", delete(handlers::remove_book))
            .with_state(self.storage.clone())
    }

    /// Memberships reference books, so these run after the book module's.
    fn migrations(&self) -> Vec<Migration> {
        vec![
            Migration {
                id: "001_init",
                up: schema::COLLECTIONS,
            },
            Migration {
                id: "002_subscriptions",
                up: schema::SUBSCRIPTIONS,
            },
        ]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "collection module stopped");
        Ok(())
    }
}

/// Create a new instance of the collection module
pub fn create_module(storage: SharedStorage) -> Arc<dyn Module> {
    Arc::new(CollectionsModule::new(storage))
}
