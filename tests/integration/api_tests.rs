//! API integration tests, driving the router in-process over the memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use catalog_server::{
    api::create_router,
    config::StoreBackend,
    models::BookData,
    repository::{CatalogStore, MemoryRepository},
    services::Services,
    AppConfig, AppState,
};

fn app(store: &MemoryRepository) -> Router {
    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(Arc::new(store.clone()))),
    };
    create_router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Option<String>, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, body)
}

#[tokio::test]
async fn test_health_check() {
    let app = app(&MemoryRepository::new());

    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body.get("store").is_none());

    let (status, _, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_author_lifecycle() {
    let store = MemoryRepository::new();
    let app = app(&store);

    let (status, _, body) = get(&app, "/catalog/author/create").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "author_form");
    assert_eq!(body["context"]["title"], "Create Author");

    let (status, location, _) = post_form(
        &app,
        "/catalog/author/create",
        "first_name=Isaac&family_name=Asimov&date_of_birth=1920-01-02&date_of_death=",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.expect("redirect location");
    assert!(location.starts_with("/catalog/author/"));

    let (status, _, body) = get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "author_detail");
    assert_eq!(body["context"]["author"]["name"], "Asimov, Isaac");

    let (_, _, body) = get(&app, "/catalog/authors").await;
    assert_eq!(body["context"]["author_list"].as_array().unwrap().len(), 1);

    let (status, updated, _) = post_form(
        &app,
        &format!("{}/update", location),
        "first_name=Isaac&family_name=Azimov",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(updated.as_deref(), Some(location.as_str()));

    let (status, redirect, _) = post_form(&app, &format!("{}/delete", location), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(redirect.as_deref(), Some("/catalog/authors"));

    let (status, _, body) = get(&app, &location).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Author not found");
}

#[tokio::test]
async fn test_invalid_author_form_is_rerendered() {
    let store = MemoryRepository::new();
    let app = app(&store);

    let (status, location, body) =
        post_form(&app, "/catalog/author/create", "first_name=&family_name=O%27Brien").await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert_eq!(body["template"], "author_form");

    let errors = body["context"]["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["msg"] == "First name must be specified."));
    assert!(errors
        .iter()
        .any(|e| e["msg"] == "Family name has non-alphanumeric characters."));
    assert_eq!(body["context"]["author"]["family_name"], "O&#x27;Brien");
    assert!(store.list_authors().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let store = MemoryRepository::new();
    let app = app(&store);

    let (_, location, _) =
        post_form(&app, "/catalog/author/create", "first_name=Isaac&family_name=Asimov").await;
    let location = location.unwrap();
    let id = Uuid::parse_str(location.rsplit('/').next().unwrap()).unwrap();
    store
        .insert_book(&BookData {
            title: "Foundation".to_string(),
            summary: "Psychohistory".to_string(),
            author: id,
        })
        .await
        .unwrap();

    let (status, _, body) = post_form(&app, &format!("{}/delete", location), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "author_delete");
    assert_eq!(body["context"]["author_books"][0]["title"], "Foundation");
    assert!(store.find_author(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_confirmation_for_unknown_author_redirects() {
    let app = app(&MemoryRepository::new());
    let (status, location, _) =
        get(&app, &format!("/catalog/author/{}/delete", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/authors"));
}

#[tokio::test]
async fn test_book_instance_flow() {
    let store = MemoryRepository::new();
    let app = app(&store);
    let book = store
        .insert_book(&BookData {
            title: "Foundation".to_string(),
            summary: "Psychohistory".to_string(),
            author: Uuid::new_v4(),
        })
        .await
        .unwrap();

    let (_, _, body) = get(&app, "/catalog/bookinstance/create").await;
    assert_eq!(body["template"], "bookinstance_form");
    assert_eq!(body["context"]["book_list"][0]["title"], "Foundation");

    let (status, location, _) = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Gnome+Press&status=Available&due_back=2024-03-05", book.id),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.unwrap();

    let (status, _, body) = get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context"]["title"], "Copy: Foundation");
    assert_eq!(body["context"]["bookinstance"]["due_back_formatted"], "05-03-2024");

    let (_, _, body) = get(&app, "/catalog/bookinstances").await;
    assert_eq!(body["template"], "bookinstance_list");
    assert_eq!(body["context"]["bookinstance_list"][0]["imprint"], "Gnome Press");

    let (status, redirect, _) = post_form(&app, &format!("{}/delete", location), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(redirect.as_deref(), Some("/catalog/bookinstances"));
}

#[tokio::test]
async fn test_unknown_book_instance_is_not_found() {
    let app = app(&MemoryRepository::new());
    for suffix in ["", "/delete", "/update"] {
        let uri = format!("/catalog/bookinstance/{}{}", Uuid::new_v4(), suffix);
        let (status, _, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], "Book copy not found");
    }
}

#[tokio::test]
async fn test_malformed_identifier_is_bad_request() {
    let app = app(&MemoryRepository::new());
    let (status, _, body) = get(&app, "/catalog/author/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
    assert_eq!(body["error"], "BadValue");
    assert!(!body["message"].as_str().unwrap().is_empty());

    let (status, _, body) =
        post_form(&app, "/catalog/bookinstance/42/update", "imprint=Gnome+Press").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}
