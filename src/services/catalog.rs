//! Catalog home page counts

use crate::{error::AppResult, models::BookStatus, repository::Repository};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: u64,
    pub book_instances: u64,
    pub book_instances_available: u64,
    pub authors: u64,
    pub genres: u64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.book_instances.count(),
            self.repository
                .book_instances
                .count_with_status(BookStatus::Available),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;
        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    /// Whether the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.store.ping().await
    }
}
