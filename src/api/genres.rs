//! Genre pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};
use maud::Markup;

use super::see_other;
use crate::{
    error::{AppError, AppResult},
    models::{DeleteConfirmation, GenreForm},
    services::guard::DeleteOutcome,
    views, AppState,
};

const LIST_URL: &str = "/catalog/genres";

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let genres = state.services.genres.list().await?;
    Ok(views::genres::list(&genres))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Markup> {
    let detail = state.services.genres.detail(&id).await?;
    Ok(views::genres::detail(&detail))
}

pub async fn create_form() -> Markup {
    views::genres::form("Create Genre", &GenreForm::default(), None)
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(&form).await {
        Ok(created) => Ok(see_other(&created.genre().url())),
        Err(AppError::Validation(errors)) => {
            Ok(views::genres::form("Create Genre", &form, Some(&errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let genre = state.services.genres.get(&id).await?;
    Ok(views::genres::form(
        "Update Genre",
        &GenreForm::from(&genre),
        None,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(&id, &form).await {
        Ok(genre) => Ok(see_other(&genre.url())),
        Err(AppError::Validation(errors)) => {
            Ok(views::genres::form("Update Genre", &form, Some(&errors)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(match state.services.genres.delete_preview(&id).await? {
        Some(dependents) => views::genres::delete(&dependents).into_response(),
        None => see_other(LIST_URL),
    })
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(confirmation): Form<DeleteConfirmation>,
) -> AppResult<Response> {
    confirmation.confirm(&id)?;
    Ok(match state.services.genres.delete(&id).await? {
        DeleteOutcome::Blocked(dependents) => views::genres::delete(&dependents).into_response(),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => see_other(LIST_URL),
    })
}
