//! Referential guard for deletions
//!
//! An author or genre cannot be removed while books reference it, and a book
//! cannot be removed while copies of it exist. The check and the removal are
//! separate store calls: a reference created in between is not detected.

use crate::{
    error::AppResult,
    models::{Book, BookInstance},
    repository::Repository,
};

/// Record whose books must be checked before it is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Referenced<'a> {
    Author(&'a str),
    Genre(&'a str),
}

/// Guard verdict: deletion is allowed only when nothing blocks it
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCheck<B> {
    pub allowed: bool,
    pub blockers: Vec<B>,
}

impl<B> DeleteCheck<B> {
    pub fn new(blockers: Vec<B>) -> Self {
        Self {
            allowed: blockers.is_empty(),
            blockers,
        }
    }
}

/// A record together with the records that depend on it
#[derive(Debug, Clone, PartialEq)]
pub struct Dependents<T, B> {
    pub record: T,
    pub blockers: Vec<B>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<T, B> {
    Deleted,
    /// Nothing to delete; the record was already gone
    Missing,
    /// Refused; nothing was removed
    Blocked(Dependents<T, B>),
}

#[derive(Clone)]
pub struct ReferentialGuard {
    repository: Repository,
}

impl ReferentialGuard {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books referencing the author or genre
    pub async fn can_delete(&self, target: Referenced<'_>) -> AppResult<DeleteCheck<Book>> {
        let blockers = match target {
            Referenced::Author(id) => self.repository.books.by_author(id).await?,
            Referenced::Genre(id) => self.repository.books.by_genre(id).await?,
        };
        Ok(DeleteCheck::new(blockers))
    }

    /// Copies of the book
    pub async fn can_delete_book(&self, book_id: &str) -> AppResult<DeleteCheck<BookInstance>> {
        let blockers = self.repository.book_instances.by_book(book_id).await?;
        Ok(DeleteCheck::new(blockers))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        models::{BookData, BookInstanceData, BookStatus},
        store::MemoryStore,
    };

    fn book(author: &str, genre: &[&str]) -> BookData {
        BookData {
            title: "Persuasion".to_string(),
            author: author.to_string(),
            summary: "Second chances.".to_string(),
            isbn: "9780141439686".to_string(),
            genre: genre.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_author_and_genre_blockers() {
        let repository = Repository::new(Arc::new(MemoryStore::new()));
        let guard = ReferentialGuard::new(repository.clone());
        repository.books.create(&book("a1", &["g1"])).await.unwrap();
        repository.books.create(&book("a1", &["g1", "g2"])).await.unwrap();

        let check = guard.can_delete(Referenced::Author("a1")).await.unwrap();
        assert!(!check.allowed);
        assert_eq!(check.blockers.len(), 2);

        let check = guard.can_delete(Referenced::Genre("g2")).await.unwrap();
        assert_eq!(check.blockers.len(), 1);

        let check = guard.can_delete(Referenced::Author("a2")).await.unwrap();
        assert!(check.allowed);
        assert!(check.blockers.is_empty());
    }

    #[tokio::test]
    async fn test_book_blocked_by_copies() {
        let repository = Repository::new(Arc::new(MemoryStore::new()));
        let guard = ReferentialGuard::new(repository.clone());
        let persuasion = repository.books.create(&book("a1", &[])).await.unwrap();
        assert!(guard.can_delete_book(&persuasion.id).await.unwrap().allowed);

        repository
            .book_instances
            .create(&BookInstanceData {
                book: persuasion.id.clone(),
                imprint: "Penguin".to_string(),
                status: BookStatus::Available,
                due_back: None,
            })
            .await
            .unwrap();
        let check = guard.can_delete_book(&persuasion.id).await.unwrap();
        assert!(!check.allowed);
        assert_eq!(check.blockers[0].book, persuasion.id);
    }
}
