use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use bms_db::{memory_pool, migrate, SqliteStorage};
use bms_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let pool = memory_pool().await.unwrap();
    let registry = bms::registry(SqliteStorage::new(pool.clone()).shared());
    migrate(&pool, &registry.collect_migrations()).await.unwrap();
    bms_http::build_router(&registry, &Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn created_book_is_listed_with_empty_fields() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/book/create", Some(json!({"title": "Dune"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "success");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["message"], "Book created successfully");

    let (status, body) = send(&app, Method::GET, "/book/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([{
            "title": "Dune",
            "author": null,
            "published_at": null,
            "edition": null,
            "description": null,
            "genre": null
        }])
    );
}

#[tokio::test]
async fn scifi_collection_scenario() {
    let app = app().await;
    send(&app, Method::POST, "/book/create", Some(json!({"title": "Dune"}))).await;

    let (status, _) = send(&app, Method::POST, "/collection/create?collection_name=scifi", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/collection/add-book?collection_name=scifi&book_title=Dune",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, "/collection/list/books?collection_name=scifi", None).await;
    assert_eq!(body["data"], json!(["Dune"]));

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/collection/remove-book?collection_name=scifi&book_title=Dune",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/collection/list/books?collection_name=scifi", None).await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = send(&app, Method::GET, "/collection/list", None).await;
    assert_eq!(body["data"], json!(["scifi"]));
}

#[tokio::test]
async fn removing_a_book_drops_its_memberships() {
    let app = app().await;
    send(&app, Method::POST, "/book/create", Some(json!({"title": "Dune"}))).await;
    send(&app, Method::POST, "/collection/create?collection_name=scifi", None).await;
    send(
        &app,
        Method::POST,
        "/collection/add-book?collection_name=scifi&book_title=Dune",
        None,
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/book/remove?title=Dune", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book removed successfully");

    let (_, body) = send(&app, Method::GET, "/book/list", None).await;
    assert_eq!(body["data"], json!([]));
    let (_, body) = send(&app, Method::GET, "/collection/list/books?collection_name=scifi", None).await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, Method::DELETE, "/book/remove?title=Dune", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "error");
}

#[tokio::test]
async fn book_updates_through_put_and_post() {
    let app = app().await;
    send(&app, Method::POST, "/book/create", Some(json!({"title": "Dune"}))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/book/set",
        Some(json!({"title": "Dune", "author": "Frank Herbert"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated successfully");

    let (status, _) = send(
        &app,
        Method::POST,
        "/book/set",
        Some(json!({"title": "Dune", "published_at": "1965-08-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/book/list?author=Frank%20Herbert", None).await;
    assert_eq!(body["data"][0]["published_at"], "1965-08-01");

    let (status, body) = send(&app, Method::PUT, "/book/set", Some(json!({"title": "Dune"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");
}

#[tokio::test]
async fn list_filters_by_publish_range() {
    let app = app().await;
    for (title, date) in [("Dune", "1965-08-01"), ("Neuromancer", "1984-07-01"), ("Hyperion", "1989-05-26")] {
        send(
            &app,
            Method::POST,
            "/book/create",
            Some(json!({"title": title, "published_at": date})),
        )
        .await;
    }

    let (_, body) = send(
        &app,
        Method::GET,
        "/book/list?publish_start=1980-01-01&publish_end=1989-12-31",
        None,
    )
    .await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Hyperion", "Neuromancer"]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/book/list?publish_start=1990-01-01&publish_end=1980-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn invalid_requests_get_error_envelopes() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/book/create", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title cannot be empty");

    let (status, body) = send(&app, Method::POST, "/book/create", Some(json!({"title": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body: "));

    let (status, body) = send(
        &app,
        Method::POST,
        "/book/create",
        Some(json!({"title": "Dune", "published_at": "01/08/1965"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "error");

    let (status, body) = send(&app, Method::GET, "/shelf/list", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "error");
}

#[tokio::test]
async fn duplicate_entries_conflict() {
    let app = app().await;
    send(&app, Method::POST, "/book/create", Some(json!({"title": "Dune"}))).await;

    let (status, body) = send(&app, Method::POST, "/book/create", Some(json!({"title": "Dune"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status_code"], 409);

    send(&app, Method::POST, "/collection/create?collection_name=scifi", None).await;
    let (status, _) = send(&app, Method::POST, "/collection/create?collection_name=scifi", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_query_strings_get_error_envelopes() {
    let app = app().await;

    for (method, uri) in [
        (Method::GET, "/book/list?title=a&title=b"),
        (Method::DELETE, "/book/remove?title=a&title=b"),
        (Method::POST, "/collection/create?collection_name=a&collection_name=b"),
        (Method::GET, "/collection/list/books?collection_name=a&collection_name=b"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["type"], "error");
        assert_eq!(body["status_code"], 400);

        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid query parameters: "), "{message}");
        assert!(message.contains("duplicate field"), "{message}");
    }
}

#[tokio::test]
async fn unsupported_methods_get_error_envelopes() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/book/create", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["type"], "error");
    assert_eq!(body["status_code"], 405);
    assert_eq!(body["message"], "Method GET not allowed for /book/create");

    let (status, body) = send(&app, Method::DELETE, "/book/set", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status_code"], 405);

    let (status, body) = send(&app, Method::POST, "/healthz", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["type"], "error");
}
