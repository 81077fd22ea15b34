//! Books repository

use std::sync::Arc;

use super::{Collection, Entity};
use crate::{
    error::AppResult,
    models::{Book, BookData},
    store::{DocumentStore, Filter, Sort},
};

impl Entity for Book {
    const COLLECTION: &'static str = "books";
    const LABEL: &'static str = "Book";
}

#[derive(Clone)]
pub struct BooksRepository {
    books: Collection<Book>,
}

impl BooksRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            books: Collection::new(store),
        }
    }

    /// All books ordered by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.books.find(&Filter::All, Sort::Ascending("title")).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        self.books.find_by_id(id).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    pub async fn by_author(&self, author_id: &str) -> AppResult<Vec<Book>> {
        self.books
            .find(&Filter::eq("author", author_id), Sort::Ascending("title"))
            .await
    }

    pub async fn by_genre(&self, genre_id: &str) -> AppResult<Vec<Book>> {
        self.books
            .find(&Filter::eq("genre", genre_id), Sort::Ascending("title"))
            .await
    }

    pub async fn create(&self, data: &BookData) -> AppResult<Book> {
        self.books.insert(data).await
    }

    pub async fn update(&self, id: &str, data: &BookData) -> AppResult<Book> {
        self.books.replace(id, data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.books.remove(id).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.books.count(&Filter::All).await
    }
}
