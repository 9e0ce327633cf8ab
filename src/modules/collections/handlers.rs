use axum::extract::{rejection::QueryRejection, Query, State};
use bms_api::Collection;
use bms_db::{DbError, SharedStorage};
use bms_http::{ApiResult, AppError, Reply};
use serde::Deserialize;

use crate::modules::{invalid_query, required};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CollectionParams {
    pub collection_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MembershipParams {
    pub collection_name: Option<String>,
    pub book_title: Option<String>,
}

pub(crate) async fn create_collection(
    State(storage): State<SharedStorage>,
    params: Result<Query<CollectionParams>, QueryRejection>,
) -> ApiResult<()> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required("collection_name", params.collection_name.as_deref())?;

    let collection = Collection {
        name: name.to_string(),
        description: params.description,
    };
    storage
        .insert_collection(&collection)
        .await
        .map_err(|err| match err {
            DbError::UniqueViolation(_) => {
                AppError::conflict(format!("Collection '{}' already exists", name))
            }
            other => other.into(),
        })?;

    tracing::info!(collection = %name, "collection created");
    Ok(Reply::created("Collection created successfully"))
}

pub(crate) async fn remove_collection(
    State(storage): State<SharedStorage>,
    params: Result<Query<CollectionParams>, QueryRejection>,
) -> ApiResult<()> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required("collection_name", params.collection_name.as_deref())?;

    if storage.delete_collection(name).await? == 0 {
        return Err(AppError::not_found(format!("Collection '{}' not found", name)));
    }

    tracing::info!(collection = %name, "collection removed");
    Ok(Reply::done("Collection removed successfully"))
}

pub(crate) async fn list_collections(
    State(storage): State<SharedStorage>,
) -> ApiResult<Vec<String>> {
    let names = storage.collection_names().await?;
    Ok(Reply::ok(names, "Collections retrieved successfully"))
}

pub(crate) async fn list_collection_books(
    State(storage): State<SharedStorage>,
    params: Result<Query<CollectionParams>, QueryRejection>,
) -> ApiResult<Vec<String>> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required("collection_name", params.collection_name.as_deref())?;

    // An unknown collection simply has no books.
    let titles = storage.collection_books(name).await?;
    Ok(Reply::ok(titles, "Books in collection retrieved successfully"))
}

pub(crate) async fn add_book(
    State(storage): State<SharedStorage>,
    params: Result<Query<MembershipParams>, QueryRejection>,
) -> ApiResult<()> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required("collection_name", params.collection_name.as_deref())?;
    let title = required("book_title", params.book_title.as_deref())?;

    storage
        .add_membership(name, title)
        .await
        .map_err(|err| match err {
            DbError::ForeignKeyViolation(_) => AppError::not_found(format!(
                "Collection '{}' or book '{}' does not exist",
                name, title
            )),
            DbError::UniqueViolation(_) => AppError::conflict(format!(
                "Book '{}' is already in collection '{}'",
                title, name
            )),
            other => other.into(),
        })?;

    tracing::info!(collection = %name, title = %title, "book added to collection");
    Ok(Reply::created("Book added to collection successfully"))
}

pub(crate) async fn remove_book(
    State(storage): State<SharedStorage>,
    params: Result<Query<MembershipParams>, QueryRejection>,
) -> ApiResult<()> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required("collection_name", params.collection_name.as_deref())?;
    let title = required("book_title", params.book_title.as_deref())?;

    if storage.remove_membership(name, title).await? == 0 {
        return Err(AppError::not_found(format!(
            "Book '{}' is not in collection '{}'",
            title, name
        )));
    }

    tracing::info!(collection = %name, title = %title, "book removed from collection");
    Ok(Reply::done("Book removed from collection successfully"))
}
