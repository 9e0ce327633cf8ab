//! Storage trait and its SQLite implementation.

use std::sync::Arc;

use async_trait::async_trait;
use bms_api::{Book, Collection};
use chrono::NaiveDate;
use sqlx::{query, query_as, FromRow, SqlitePool};

use crate::clause::{Clause, Mode, SqlValue};
use crate::error::Result;

/// Storage handle shared by every request handler.
pub type SharedStorage = Arc<dyn Storage>;

/// Data access for books, collections and memberships.
///
/// Row-count results report how many rows the statement touched so callers
/// can tell "nothing matched" apart from success.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a book. Fails with `UniqueViolation` when the title exists.
    async fn insert_book(&self, book: &Book) -> Result<()>;

    /// Apply an update clause to the book with `title`.
    async fn update_book(&self, title: &str, assignments: &Clause) -> Result<u64>;

    /// Delete a book and its memberships in one transaction.
    async fn delete_book(&self, title: &str) -> Result<u64>;

    /// Books matching a filter clause, ordered by title.
    async fn select_books(&self, filter: &Clause) -> Result<Vec<Book>>;

    /// Insert a collection. Fails with `UniqueViolation` when the name exists.
    async fn insert_collection(&self, collection: &Collection) -> Result<()>;

    /// Delete a collection and its memberships in one transaction.
    async fn delete_collection(&self, name: &str) -> Result<u64>;

    /// All collection names, ordered.
    async fn collection_names(&self) -> Result<Vec<String>>;

    /// Titles of the books in a collection, ordered.
    async fn collection_books(&self, collection: &str) -> Result<Vec<String>>;

    /// Add a membership. Fails with `ForeignKeyViolation` when either side is missing.
    async fn add_membership(&self, collection: &str, title: &str) -> Result<()>;

    async fn remove_membership(&self, collection: &str, title: &str) -> Result<u64>;
}

#[derive(FromRow)]
struct BookRow {
    title: String,
    author: Option<String>,
    published_at: Option<NaiveDate>,
    edition: Option<String>,
    description: Option<String>,
    genre: Option<String>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            title: row.title,
            author: row.author,
            published_at: row.published_at,
            edition: row.edition,
            description: row.description,
            genre: row.genre,
        }
    }
}

/// SQLite implementation of [`Storage`]
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn shared(self) -> SharedStorage {
        Arc::new(self)
    }
}

/// Optional text column: blank strings are stored as NULL.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn insert_book(&self, book: &Book) -> Result<()> {
        query(
            r#"
            INSERT INTO books (title, author, published_at, edition, description, genre)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&book.title)
        .bind(text(&book.author))
        .bind(book.published_at)
        .bind(text(&book.edition))
        .bind(text(&book.description))
        .bind(text(&book.genre))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_book(&self, title: &str, assignments: &Clause) -> Result<u64> {
        debug_assert_eq!(assignments.mode(), Mode::Update);

        let sql = format!(
            "UPDATE books SET {} WHERE title = ?{}",
            assignments.sql(),
            assignments.next_placeholder()
        );

        let mut statement = query(&sql);
        for value in assignments.values() {
            statement = match value {
                SqlValue::Text(text) => statement.bind(text.clone()),
                SqlValue::Date(date) => statement.bind(*date),
            };
        }

        let result = statement.bind(title).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_book(&self, title: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        query("DELETE FROM collection_subscriptions WHERE book_title = ?1")
            .bind(title)
            .execute(&mut *tx)
            .await?;
        let result = query("DELETE FROM books WHERE title = ?1")
            .bind(title)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn select_books(&self, filter: &Clause) -> Result<Vec<Book>> {
        debug_assert_eq!(filter.mode(), Mode::Filter);

        let sql = format!(
            "SELECT title, author, published_at, edition, description, genre FROM books{} ORDER BY title",
            filter.where_sql()
        );

        let mut statement = query_as::<_, BookRow>(&sql);
        for value in filter.values() {
            statement = match value {
                SqlValue::Text(text) => statement.bind(text.clone()),
                SqlValue::Date(date) => statement.bind(*date),
            };
        }

        let rows = statement.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn insert_collection(&self, collection: &Collection) -> Result<()> {
        query("INSERT INTO collections (name, description) VALUES (?1, ?2)")
            .bind(&collection.name)
            .bind(text(&collection.description))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        query("DELETE FROM collection_subscriptions WHERE collection_name = ?1")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        let result = query("DELETE FROM collections WHERE name = ?1")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn collection_names(&self) -> Result<Vec<String>> {
        let names: Vec<(String,)> = query_as("SELECT name FROM collections ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    async fn collection_books(&self, collection: &str) -> Result<Vec<String>> {
        let titles: Vec<(String,)> = query_as(
            "SELECT book_title FROM collection_subscriptions WHERE collection_name = ?1 ORDER BY book_title",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(titles.into_iter().map(|(title,)| title).collect())
    }

    async fn add_membership(&self, collection: &str, title: &str) -> Result<()> {
        query("INSERT INTO collection_subscriptions (collection_name, book_title) VALUES (?1, ?2)")
            .bind(collection)
            .bind(title)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove_membership(&self, collection: &str, title: &str) -> Result<u64> {
        let result = query(
            "DELETE FROM collection_subscriptions WHERE collection_name = ?1 AND book_title = ?2",
        )
        .bind(collection)
        .bind(title)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
