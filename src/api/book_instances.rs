//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};
use maud::Markup;

use super::see_other;
use crate::{
    error::{AppError, AppResult},
    models::{BookInstanceForm, DeleteConfirmation},
    views, AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let entries = state.services.book_instances.list().await?;
    Ok(views::book_instances::list(&entries))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Markup> {
    let entry = state.services.book_instances.detail(&id).await?;
    Ok(views::book_instances::detail(&entry))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Markup> {
    let books = state.services.book_instances.book_choices().await?;
    Ok(views::book_instances::form(
        "Create BookInstance",
        &BookInstanceForm::default(),
        &books,
        None,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(&form).await {
        Ok(instance) => Ok(see_other(&instance.url())),
        Err(AppError::Validation(errors)) => {
            let books = state.services.book_instances.book_choices().await?;
            Ok(
                views::book_instances::form("Create BookInstance", &form, &books, Some(&errors))
                    .into_response(),
            )
        }
        Err(e) => Err(e),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let (instance, books) = state.services.book_instances.edit(&id).await?;
    Ok(views::book_instances::form(
        "Update BookInstance",
        &BookInstanceForm::from(&instance),
        &books,
        None,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.update(&id, &form).await {
        Ok(instance) => Ok(see_other(&instance.url())),
        Err(AppError::Validation(errors)) => {
            let books = state.services.book_instances.book_choices().await?;
            Ok(
                views::book_instances::form("Update BookInstance", &form, &books, Some(&errors))
                    .into_response(),
            )
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.delete_preview(&id).await? {
        Some(entry) => views::book_instances::delete(&entry).into_response(),
        None => see_other(LIST_URL),
    })
}

/// Copies have no dependents; a confirmed delete always goes through
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(confirmation): Form<DeleteConfirmation>,
) -> AppResult<Response> {
    confirmation.confirm(&id)?;
    state.services.book_instances.delete(&id).await?;
    Ok(see_other(LIST_URL))
}
