//! Author pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};
use maud::Markup;

use super::see_other;
use crate::{
    error::{AppError, AppResult},
    models::{AuthorForm, DeleteConfirmation},
    services::guard::DeleteOutcome,
    views, AppState,
};

const LIST_URL: &str = "/catalog/authors";

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let authors = state.services.authors.list().await?;
    Ok(views::authors::list(&authors))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Markup> {
    let detail = state.services.authors.detail(&id).await?;
    Ok(views::authors::detail(&detail))
}

pub async fn create_form() -> Markup {
    views::authors::form("Create Author", &AuthorForm::default(), None)
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(&form).await {
        Ok(author) => Ok(see_other(&author.url())),
        Err(AppError::Validation(errors)) => {
            Ok(views::authors::form("Create Author", &form, Some(&errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let author = state.services.authors.get(&id).await?;
    Ok(views::authors::form(
        "Update Author",
        &AuthorForm::from(&author),
        None,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(&id, &form).await {
        Ok(author) => Ok(see_other(&author.url())),
        Err(AppError::Validation(errors)) => {
            Ok(views::authors::form("Update Author", &form, Some(&errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.services.authors.delete_preview(&id).await? {
        Some(dependents) => views::authors::delete(&dependents).into_response(),
        None => see_other(LIST_URL),
    })
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(confirmation): Form<DeleteConfirmation>,
) -> AppResult<Response> {
    confirmation.confirm(&id)?;
    Ok(match state.services.authors.delete(&id).await? {
        DeleteOutcome::Blocked(dependents) => views::authors::delete(&dependents).into_response(),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => see_other(LIST_URL),
    })
}
