//! Book instance service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceForm},
    repository::Repository,
};

/// Copy together with the book it belongs to
#[derive(Debug, Clone)]
pub struct BookInstanceEntry {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceEntry>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances.list(),
            self.repository.books.list(),
        )?;
        let books: HashMap<String, Book> = books.into_iter().map(|b| (b.id.clone(), b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceEntry {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    pub async fn detail(&self, id: &str) -> AppResult<BookInstanceEntry> {
        let instance = self.repository.book_instances.get_by_id(id).await?;
        let book = self.repository.books.find_by_id(&instance.book).await?;
        Ok(BookInstanceEntry { instance, book })
    }

    /// Books offered by the copy form
    pub async fn book_choices(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Copy to edit, with the book choices
    pub async fn edit(&self, id: &str) -> AppResult<(BookInstance, Vec<Book>)> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances.get_by_id(id),
            self.repository.books.list(),
        )?;
        Ok((instance, books))
    }

    pub async fn create(&self, form: &BookInstanceForm) -> AppResult<BookInstance> {
        let data = form.clean().map_err(AppError::Validation)?;
        let instance = self.repository.book_instances.create(&data).await?;
        tracing::info!("Book copy created: id={} book={}", instance.id, instance.book);
        Ok(instance)
    }

    pub async fn update(&self, id: &str, form: &BookInstanceForm) -> AppResult<BookInstance> {
        let data = form.clean().map_err(AppError::Validation)?;
        let instance = self.repository.book_instances.update(id, &data).await?;
        tracing::info!("Book copy updated: id={}", instance.id);
        Ok(instance)
    }

    /// Copy shown on the delete confirmation; `None` if it is gone
    pub async fn delete_preview(&self, id: &str) -> AppResult<Option<BookInstanceEntry>> {
        let Some(instance) = self.repository.book_instances.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books.find_by_id(&instance.book).await?;
        Ok(Some(BookInstanceEntry { instance, book }))
    }

    /// Copies have no dependents, so deletion is never refused
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let removed = self.repository.book_instances.delete(id).await?;
        if removed {
            tracing::info!("Book copy deleted: id={}", id);
        }
        Ok(removed)
    }
}
