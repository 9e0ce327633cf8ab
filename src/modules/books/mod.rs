mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use bms_db::{schema, SharedStorage};
use bms_kernel::{InitCtx, Migration, Module};

/// Book catalogue: create, filter, update and remove books
pub struct BooksModule {
    storage: SharedStorage,
}

impl BooksModule {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/create", post(handlers::create_book))
            .route("/list", get(handlers::list_books))
            .route("/set", put(handlers::update_book).post(handlers::update_book))
            .route("/remove", delete(handlers::remove_book))
            .with_state(self.storage.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: schema::BOOKS,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

/// Create a new instance of the book module
pub fn create_module(storage: SharedStorage) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(storage))
}
