//! Book instances repository

use std::sync::Arc;

use super::{Collection, Entity};
use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceData, BookStatus},
    store::{DocumentStore, Filter, Sort},
};

impl Entity for BookInstance {
    const COLLECTION: &'static str = "bookinstances";
    const LABEL: &'static str = "Book copy";
}

#[derive(Clone)]
pub struct BookInstancesRepository {
    instances: Collection<BookInstance>,
}

impl BookInstancesRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            instances: Collection::new(store),
        }
    }

    /// All copies in insertion order
    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        self.instances.find(&Filter::All, Sort::Natural).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<BookInstance>> {
        self.instances.find_by_id(id).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<BookInstance> {
        self.instances.get_by_id(id).await
    }

    pub async fn by_book(&self, book_id: &str) -> AppResult<Vec<BookInstance>> {
        self.instances
            .find(&Filter::eq("book", book_id), Sort::Natural)
            .await
    }

    pub async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        self.instances.insert(data).await
    }

    pub async fn update(&self, id: &str, data: &BookInstanceData) -> AppResult<BookInstance> {
        self.instances.replace(id, data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.instances.remove(id).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.instances.count(&Filter::All).await
    }

    pub async fn count_with_status(&self, status: BookStatus) -> AppResult<u64> {
        self.instances
            .count(&Filter::eq("status", status.as_str()))
            .await
    }
}
