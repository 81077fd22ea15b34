//! Genres repository

use std::sync::Arc;

use super::{Collection, Entity};
use crate::{
    error::AppResult,
    models::{Genre, GenreData},
    store::{DocumentStore, Filter, Sort},
};

impl Entity for Genre {
    const COLLECTION: &'static str = "genres";
    const LABEL: &'static str = "Genre";
}

#[derive(Clone)]
pub struct GenresRepository {
    genres: Collection<Genre>,
}

impl GenresRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            genres: Collection::new(store),
        }
    }

    /// All genres ordered by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.genres.find(&Filter::All, Sort::Ascending("name")).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Genre>> {
        self.genres.find_by_id(id).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Genre> {
        self.genres.get_by_id(id).await
    }

    /// Exact (case-sensitive) match on the stored, sanitized name
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres.find_one(&Filter::eq("name", name)).await
    }

    pub async fn create(&self, data: &GenreData) -> AppResult<Genre> {
        self.genres.insert(data).await
    }

    pub async fn update(&self, id: &str, data: &GenreData) -> AppResult<Genre> {
        self.genres.replace(id, data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.genres.remove(id).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.genres.count(&Filter::All).await
    }
}
