//! Authors repository

use std::sync::Arc;

use super::{Collection, Entity};
use crate::{
    error::AppResult,
    models::{Author, AuthorData},
    store::{DocumentStore, Filter, Sort},
};

impl Entity for Author {
    const COLLECTION: &'static str = "authors";
    const LABEL: &'static str = "Author";
}

#[derive(Clone)]
pub struct AuthorsRepository {
    authors: Collection<Author>,
}

impl AuthorsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            authors: Collection::new(store),
        }
    }

    /// All authors ordered by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.authors.find(&Filter::All, Sort::Ascending("family_name")).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        self.authors.find_by_id(id).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Author> {
        self.authors.get_by_id(id).await
    }

    pub async fn create(&self, data: &AuthorData) -> AppResult<Author> {
        self.authors.insert(data).await
    }

    pub async fn update(&self, id: &str, data: &AuthorData) -> AppResult<Author> {
        self.authors.replace(id, data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.authors.remove(id).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.authors.count(&Filter::All).await
    }
}
