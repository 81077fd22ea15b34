//! Book pages
//!
//! The book form repeats its `genre` field once per checked box, so it is
//! read with the `axum_extra` form extractor, which collects repeated keys.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use super::see_other;
use crate::{
    error::{AppError, AppResult},
    models::{BookForm, DeleteConfirmation},
    services::guard::DeleteOutcome,
    views, AppState,
};

const LIST_URL: &str = "/catalog/books";

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let entries = state.services.books.list().await?;
    Ok(views::books::list(&entries))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Markup> {
    let detail = state.services.books.detail(&id).await?;
    Ok(views::books::detail(&detail))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Markup> {
    let choices = state.services.books.form_choices().await?;
    Ok(views::books::form(
        "Create Book",
        &BookForm::default(),
        &choices,
        None,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(&form).await {
        Ok(book) => Ok(see_other(&book.url())),
        Err(AppError::Validation(errors)) => {
            let choices = state.services.books.form_choices().await?;
            Ok(views::books::form("Create Book", &form, &choices, Some(&errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let (book, choices) = state.services.books.edit(&id).await?;
    Ok(views::books::form(
        "Update Book",
        &BookForm::from(&book),
        &choices,
        None,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.update(&id, &form).await {
        Ok(book) => Ok(see_other(&book.url())),
        Err(AppError::Validation(errors)) => {
            let choices = state.services.books.form_choices().await?;
            Ok(views::books::form("Update Book", &form, &choices, Some(&errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.services.books.delete_preview(&id).await? {
        Some(dependents) => views::books::delete(&dependents).into_response(),
        None => see_other(LIST_URL),
    })
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(confirmation): Form<DeleteConfirmation>,
) -> AppResult<Response> {
    confirmation.confirm(&id)?;
    Ok(match state.services.books.delete(&id).await? {
        DeleteOutcome::Blocked(dependents) => views::books::delete(&dependents).into_response(),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => see_other(LIST_URL),
    })
}
