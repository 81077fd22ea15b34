//! Book service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookForm, BookInstance, Genre},
    repository::Repository,
    services::guard::{DeleteOutcome, Dependents, ReferentialGuard},
};

/// Book with its author, for list pages
#[derive(Debug, Clone)]
pub struct BookListEntry {
    pub book: Book,
    pub author: Option<Author>,
}

#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Authors and genres offered by the book form
#[derive(Debug, Clone, Default)]
pub struct BookFormChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    guard: ReferentialGuard,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self {
            guard: ReferentialGuard::new(repository.clone()),
            repository,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let (books, authors) = tokio::try_join!(
            self.repository.books.list(),
            self.repository.authors.list(),
        )?;
        let authors: HashMap<String, Author> =
            authors.into_iter().map(|a| (a.id.clone(), a)).collect();
        Ok(books
            .into_iter()
            .map(|book| BookListEntry {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect())
    }

    pub async fn detail(&self, id: &str) -> AppResult<BookDetail> {
        let (book, instances) = tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.book_instances.by_book(id),
        )?;
        let (author, genres) = tokio::try_join!(
            self.repository.authors.find_by_id(&book.author),
            self.repository.genres.list(),
        )?;
        let genres = genres
            .into_iter()
            .filter(|g| book.genre.contains(&g.id))
            .collect();
        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    pub async fn form_choices(&self) -> AppResult<BookFormChoices> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        Ok(BookFormChoices { authors, genres })
    }

    /// Book to edit, with the form choices
    pub async fn edit(&self, id: &str) -> AppResult<(Book, BookFormChoices)> {
        let (book, choices) =
            tokio::try_join!(self.repository.books.get_by_id(id), self.form_choices())?;
        Ok((book, choices))
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let data = form.clean().map_err(AppError::Validation)?;
        let book = self.repository.books.create(&data).await?;
        tracing::info!("Book created: id={} title={}", book.id, book.title);
        Ok(book)
    }

    pub async fn update(&self, id: &str, form: &BookForm) -> AppResult<Book> {
        let data = form.clean().map_err(AppError::Validation)?;
        let book = self.repository.books.update(id, &data).await?;
        tracing::info!("Book updated: id={}", book.id);
        Ok(book)
    }

    pub async fn delete_preview(
        &self,
        id: &str,
    ) -> AppResult<Option<Dependents<Book, BookInstance>>> {
        let (book, check) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.guard.can_delete_book(id),
        )?;
        Ok(book.map(|record| Dependents {
            record,
            blockers: check.blockers,
        }))
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        let (book, check) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.guard.can_delete_book(id),
        )?;
        let Some(book) = book else {
            return Ok(DeleteOutcome::Missing);
        };
        if !check.allowed {
            tracing::info!(
                "Book delete refused: id={} still has {} copies",
                id,
                check.blockers.len()
            );
            return Ok(DeleteOutcome::Blocked(Dependents {
                record: book,
                blockers: check.blockers,
            }));
        }
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
