use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use bms_api::{parse_date, Book, DateError};
use bms_db::{ClauseBuilder, DbError, SharedStorage};
use bms_http::{ApiResult, AppError, Reply};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::{invalid_body, invalid_query, required};

/// Filters accepted by `GET /book/list`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publish_start: Option<String>,
    pub publish_end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TitleQuery {
    pub title: Option<String>,
}

fn optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, DateError> {
    match value {
        Some(value) if !value.trim().is_empty() => parse_date(field, value).map(Some),
        _ => Ok(None),
    }
}

pub(crate) async fn create_book(
    State(storage): State<SharedStorage>,
    payload: Result<Json<Book>, JsonRejection>,
) -> ApiResult<()> {
    let Json(book) = payload.map_err(invalid_body)?;
    required("Title", Some(book.title.as_str()))?;

    storage.insert_book(&book).await.map_err(|err| match err {
        DbError::UniqueViolation(_) => {
            AppError::conflict(format!("Book '{}' already exists", book.title))
        }
        other => other.into(),
    })?;

    tracing::info!(title = %book.title, "book created");
    Ok(Reply::created("Book created successfully"))
}

pub(crate) async fn update_book(
    State(storage): State<SharedStorage>,
    payload: Result<Json<Book>, JsonRejection>,
) -> ApiResult<()> {
    let Json(book) = payload.map_err(invalid_body)?;
    let title = required("Title", Some(book.title.as_str()))?;

    let assignments = ClauseBuilder::update()
        .set("author", book.author.as_deref())
        .set("published_at", book.published_at)
        .set("edition", book.edition.as_deref())
        .set("description", book.description.as_deref())
        .set("genre", book.genre.as_deref())
        .build()?;

    if storage.update_book(title, &assignments).await? == 0 {
        return Err(AppError::not_found(format!("Book '{}' not found", title)));
    }

    tracing::info!(title = %title, fields = assignments.values().len(), "book updated");
    Ok(Reply::done("Book updated successfully"))
}

pub(crate) async fn remove_book(
    State(storage): State<SharedStorage>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> ApiResult<()> {
    let Query(query) = query.map_err(invalid_query)?;
    let title = required("Title", query.title.as_deref())?;

    if storage.delete_book(title).await? == 0 {
        return Err(AppError::not_found(format!("Book '{}' not found", title)));
    }

    tracing::info!(title = %title, "book removed");
    Ok(Reply::done("Book removed successfully"))
}

pub(crate) async fn list_books(
    State(storage): State<SharedStorage>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> ApiResult<Vec<Book>> {
    let Query(query) = query.map_err(invalid_query)?;
    let start = optional_date("publish_start", query.publish_start.as_deref())?;
    let end = optional_date("publish_end", query.publish_end.as_deref())?;

    let filter = ClauseBuilder::filter()
        .eq("title", query.title.as_deref())
        .eq("genre", query.genre.as_deref())
        .eq("author", query.author.as_deref())
        .range("published_at", start, end)?
        .build()?;

    let books = storage.select_books(&filter).await?;
    tracing::debug!(filters = filter.values().len(), count = books.len(), "books listed");
    Ok(Reply::ok(books, "Books retrieved successfully"))
}
