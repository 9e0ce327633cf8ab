//! SQLite persistence for BMS: pool factory, migration runner, the
//! conditional clause builder and the `Storage` trait.

pub mod clause;
pub mod error;
pub mod migrate;
pub mod pool;
pub mod schema;
pub mod storage;

pub use clause::{Clause, ClauseBuilder, ClauseError, SqlValue};
pub use error::DbError;
pub use migrate::migrate;
pub use pool::{connect, memory_pool};
pub use storage::{SharedStorage, SqliteStorage, Storage};
