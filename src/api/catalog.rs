//! Catalog home page

use axum::extract::State;
use maud::Markup;

use crate::{error::AppResult, views, AppState};

pub async fn index(State(state): State<AppState>) -> AppResult<Markup> {
    let counts = state.services.catalog.counts().await?;
    Ok(views::catalog::index(&counts))
}
