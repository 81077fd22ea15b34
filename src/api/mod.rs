//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list))
        .route("/authors/create", get(authors::create_form).post(authors::create))
        .route("/authors/:id", get(authors::detail))
        .route("/authors/:id/update", get(authors::update_form).post(authors::update))
        .route("/authors/:id/delete", get(authors::delete_form).post(authors::delete))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genres/create", get(genres::create_form).post(genres::create))
        .route("/genres/:id", get(genres::detail))
        .route("/genres/:id/update", get(genres::update_form).post(genres::update))
        .route("/genres/:id/delete", get(genres::delete_form).post(genres::delete))
        // Books
        .route("/books", get(books::list))
        .route("/books/create", get(books::create_form).post(books::create))
        .route("/books/:id", get(books::detail))
        .route("/books/:id/update", get(books::update_form).post(books::update))
        .route("/books/:id/delete", get(books::delete_form).post(books::delete))
        // Book instances
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstances/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstances/:id", get(book_instances::detail))
        .route(
            "/bookinstances/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .route(
            "/bookinstances/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// 303 to a canonical page after a successful POST
pub(crate) fn see_other(url: &str) -> Response {
    Redirect::to(url).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{error::AppError, store::MockDocumentStore, AppConfig};

    const FAILURE: &str = "disk full at /var/lib/library";

    fn failing_app() -> Router {
        let mut store = MockDocumentStore::new();
        store
            .expect_find()
            .returning(|_, _, _| Err(AppError::Internal(FAILURE.to_string())));
        store
            .expect_ping()
            .returning(|| Err(AppError::Internal(FAILURE.to_string())));
        router(AppState::new(AppConfig::default(), Arc::new(store)))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_store_failure_renders_generic_error_page() {
        let (status, html) = fetch(failing_app(), "/catalog/authors").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains("Internal server error"));
        assert!(!html.contains(FAILURE));
    }

    #[tokio::test]
    async fn test_readiness_reports_unavailable_store() {
        let (status, body) = fetch(failing_app(), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains(r#""status":"unavailable""#));
        assert!(body.contains(r#""store":"memory""#));
    }
}
