//! Repository layer over the document store

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{AppError, AppResult},
    store::{decode_all, encode, DocumentStore, Filter, Sort},
};

/// A model stored as documents in one collection
pub trait Entity: DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
    /// Name used in "not found" messages
    const LABEL: &'static str;
}

/// Typed view of one collection
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn find(&self, filter: &Filter, sort: Sort) -> AppResult<Vec<T>> {
        decode_all(self.store.find(T::COLLECTION, filter, sort).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Like [`find_by_id`](Self::find_by_id), but a missing record is `NotFound`
    pub async fn get_by_id(&self, id: &str) -> AppResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", T::LABEL)))
    }

    pub async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>> {
        self.store
            .find_one(T::COLLECTION, filter)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn count(&self, filter: &Filter) -> AppResult<u64> {
        self.store.count(T::COLLECTION, filter).await
    }

    pub async fn insert<D: Serialize + Sync>(&self, data: &D) -> AppResult<T> {
        self.store
            .insert(T::COLLECTION, encode(data)?)
            .await?
            .decode()
    }

    /// Full replace by id; a missing record is `NotFound`
    pub async fn replace<D: Serialize + Sync>(&self, id: &str, data: &D) -> AppResult<T> {
        self.store
            .replace(T::COLLECTION, id, encode(data)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", T::LABEL)))?
            .decode()
    }

    pub async fn remove(&self, id: &str) -> AppResult<bool> {
        self.store.remove(T::COLLECTION, id).await
    }
}

/// Main repository struct holding the injected store
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(store.clone()),
            genres: genres::GenresRepository::new(store.clone()),
            books: books::BooksRepository::new(store.clone()),
            book_instances: book_instances::BookInstancesRepository::new(store.clone()),
            store,
        }
    }
}
