//! HTTP integration tests
//!
//! Each test drives the full router over a fresh in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use local_library::{api, store::MemoryStore, AppConfig, AppState};

fn app() -> Router {
    let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()));
    api::router(state)
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, uri: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
        .to_string()
}

fn id_of(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}

async fn create_author(app: &Router, first: &str, family: &str) -> String {
    let response = post(
        app,
        "/catalog/authors/create",
        &format!("first_name={}&family_name={}&date_of_birth=1775-12-16", first, family),
    )
    .await;
    location(&response)
}

async fn create_genre(app: &Router, name: &str) -> String {
    let response = post(app, "/catalog/genres/create", &format!("name={}", name)).await;
    location(&response)
}

async fn create_book(app: &Router, title: &str, author_id: &str, genre_ids: &[&str]) -> String {
    let mut form = format!("title={}&author={}&summary=Plot&isbn=9780141439518", title, author_id);
    for genre in genre_ids {
        form.push_str(&format!("&genre={}", genre));
    }
    let response = post(app, "/catalog/books/create", &form).await;
    location(&response)
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");

    let response = get(&app, "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_root_redirects_to_catalog_home() {
    let app = app();
    let response = get(&app, "/").await;
    assert_eq!(location(&response), "/catalog");

    create_genre(&app, "Satire").await;
    let html = body_text(get(&app, "/catalog").await).await;
    assert!(html.contains("<strong>Genres: </strong>1"));
    assert!(html.contains("<strong>Books: </strong>0"));
}

#[tokio::test]
async fn test_create_author_and_show_detail() {
    let app = app();
    let url = create_author(&app, "Jane", "Austen").await;
    assert!(url.starts_with("/catalog/authors/"));

    let response = get(&app, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Author: Austen, Jane"));
    assert!(html.contains("Dec 16, 1775 - "));

    let list = body_text(get(&app, "/catalog/authors").await).await;
    assert!(list.contains("Austen, Jane"));
}

#[tokio::test]
async fn test_author_dates_accept_iso_date_times() {
    let app = app();
    let response = post(
        &app,
        "/catalog/authors/create",
        concat!(
            "first_name=Jane&family_name=Austen",
            "&date_of_birth=1775-12-16T10%3A00&date_of_death=18170718"
        ),
    )
    .await;
    let url = location(&response);

    let html = body_text(get(&app, &url).await).await;
    assert!(html.contains("Dec 16, 1775 - Jul 18, 1817"));
}

#[tokio::test]
async fn test_author_validation_rerenders_form() {
    let app = app();
    let response = post(
        &app,
        "/catalog/authors/create",
        "first_name=Mary+Ann&family_name=&date_of_birth=16%2F12%2F1775",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("First name has non-alphanumeric characters."));
    assert!(html.contains("Family name must be specified."));
    assert!(html.contains("Invalid date of birth"));
    assert!(html.contains(r#"value="Mary Ann""#));

    let list = body_text(get(&app, "/catalog/authors").await).await;
    assert!(list.contains("There are no authors."));
}

#[tokio::test]
async fn test_short_genre_name_is_rejected() {
    let app = app();
    let response = post(&app, "/catalog/genres/create", "name=Fi").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Genre name must contain at least 3 characters"));

    let list = body_text(get(&app, "/catalog/genres").await).await;
    assert!(!list.contains("Fi</a>"));
}

#[tokio::test]
async fn test_duplicate_genre_redirects_to_existing() {
    let app = app();
    let first = create_genre(&app, "Fantasy").await;
    let second = create_genre(&app, "Fantasy").await;
    assert_eq!(first, second);

    let other = create_genre(&app, "fantasy").await;
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_update_is_full_replace() {
    let app = app();
    let url = create_author(&app, "Jane", "Austen").await;

    let form = body_text(get(&app, &format!("{}/update", url)).await).await;
    assert!(form.contains(r#"value="1775-12-16""#));

    let response = post(
        &app,
        &format!("{}/update", url),
        "first_name=Charlotte&family_name=Bronte&date_of_birth=1816-04-21",
    )
    .await;
    assert_eq!(location(&response), url);

    let html = body_text(get(&app, &url).await).await;
    assert!(html.contains("Bronte, Charlotte"));
    assert!(html.contains("Apr 21, 1816"));
    assert!(!html.contains("Austen"));
}

#[tokio::test]
async fn test_invalid_update_rerenders_and_keeps_record() {
    let app = app();
    let url = create_author(&app, "Jane", "Austen").await;

    let response = post(&app, &format!("{}/update", url), "first_name=&family_name=Austen").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("First name must be specified."));

    let html = body_text(get(&app, &url).await).await;
    assert!(html.contains("Austen, Jane"));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = app();
    for uri in [
        "/catalog/authors/missing",
        "/catalog/genres/missing",
        "/catalog/books/missing",
        "/catalog/bookinstances/missing",
        "/catalog/authors/missing/update",
        "/catalog/books/missing/update",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let response = post(
        &app,
        "/catalog/genres/missing/update",
        "name=Romance",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_author_with_books_is_refused() {
    let app = app();
    let author_url = create_author(&app, "Jane", "Austen").await;
    let author_id = id_of(&author_url);
    create_book(&app, "Emma", &author_id, &[]).await;
    create_book(&app, "Persuasion", &author_id, &[]).await;

    let delete_url = format!("{}/delete", author_url);
    let html = body_text(get(&app, &delete_url).await).await;
    assert!(html.contains("Delete the following books"));
    assert!(!html.contains(r#"name="authorid""#));

    let response = post(&app, &delete_url, &format!("authorid={}", author_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Emma"));
    assert!(html.contains("Persuasion"));

    assert_eq!(get(&app, &author_url).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_unreferenced_author_and_genre() {
    let app = app();
    let author_url = create_author(&app, "Jane", "Austen").await;
    let response = post(
        &app,
        &format!("{}/delete", author_url),
        &format!("authorid={}", id_of(&author_url)),
    )
    .await;
    assert_eq!(location(&response), "/catalog/authors");
    assert_eq!(get(&app, &author_url).await.status(), StatusCode::NOT_FOUND);

    let genre_url = create_genre(&app, "Poetry").await;
    let response = post(
        &app,
        &format!("{}/delete", genre_url),
        &format!("genreid={}", id_of(&genre_url)),
    )
    .await;
    assert_eq!(location(&response), "/catalog/genres");
    assert_eq!(get(&app, &genre_url).await.status(), StatusCode::NOT_FOUND);

    // Confirmation page for a record that is already gone
    let response = get(&app, &format!("{}/delete", genre_url)).await;
    assert_eq!(location(&response), "/catalog/genres");
}

#[tokio::test]
async fn test_delete_genre_used_by_book_is_refused() {
    let app = app();
    let author_id = id_of(&create_author(&app, "Mary", "Shelley").await);
    let genre_url = create_genre(&app, "Gothic").await;
    let genre_id = id_of(&genre_url);
    create_book(&app, "Frankenstein", &author_id, &[&genre_id]).await;

    let response = post(
        &app,
        &format!("{}/delete", genre_url),
        &format!("genreid={}", genre_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Frankenstein"));
    assert_eq!(get(&app, &genre_url).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_requires_matching_id() {
    let app = app();
    let url = create_author(&app, "Jane", "Austen").await;

    let response = post(&app, &format!("{}/delete", url), "authorid=someone-else").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post(&app, &format!("{}/delete", url), "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(get(&app, &url).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_book_with_genres_and_copies() {
    let app = app();
    let author_id = id_of(&create_author(&app, "Mary", "Shelley").await);
    let gothic = id_of(&create_genre(&app, "Gothic").await);
    let horror = id_of(&create_genre(&app, "Horror").await);
    let book_url = create_book(&app, "Frankenstein", &author_id, &[&gothic, &horror]).await;
    let book_id = id_of(&book_url);

    let html = body_text(get(&app, &book_url).await).await;
    assert!(html.contains("Title: Frankenstein"));
    assert!(html.contains("Shelley, Mary"));
    assert!(html.contains("Gothic"));
    assert!(html.contains("Horror"));

    let form = body_text(get(&app, &format!("{}/update", book_url)).await).await;
    assert!(form.contains(&format!(r#"value="{}" checked>"#, gothic)));

    let response = post(
        &app,
        "/catalog/bookinstances/create",
        &format!("book={}&imprint=Lackington%2C+1818&status=Loaned&due_back=2024-06-01", book_id),
    )
    .await;
    let copy_url = location(&response);

    let html = body_text(get(&app, &copy_url).await).await;
    assert!(html.contains("Frankenstein"));
    assert!(html.contains("Jun 1, 2024"));

    // A book with copies cannot be deleted
    let response = post(
        &app,
        &format!("{}/delete", book_url),
        &format!("bookid={}", book_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Delete the following copies"));

    // Copies are deleted without a guard
    let response = post(
        &app,
        &format!("{}/delete", copy_url),
        &format!("bookinstanceid={}", id_of(&copy_url)),
    )
    .await;
    assert_eq!(location(&response), "/catalog/bookinstances");
    assert_eq!(get(&app, &copy_url).await.status(), StatusCode::NOT_FOUND);

    let response = post(
        &app,
        &format!("{}/delete", book_url),
        &format!("bookid={}", book_id),
    )
    .await;
    assert_eq!(location(&response), "/catalog/books");
    assert_eq!(get(&app, &book_url).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_instance_validation() {
    let app = app();
    let response = post(
        &app,
        "/catalog/bookinstances/create",
        "book=&imprint=&status=Lost&due_back=soon",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Book must be specified"));
    assert!(html.contains("Imprint must be specified"));
    assert!(html.contains("Invalid status"));
    assert!(html.contains("Invalid date"));
}

#[tokio::test]
async fn test_stored_markup_is_escaped() {
    let app = app();
    let url = create_genre(&app, "%3Cscript%3E").await;
    let html = body_text(get(&app, &url).await).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}
