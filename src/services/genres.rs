//! Genre service

use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm},
    repository::Repository,
    services::guard::{DeleteOutcome, Dependents, Referenced, ReferentialGuard},
    validation::FieldErrors,
};

#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Result of a create request; names are unique, so an existing genre wins
#[derive(Debug, Clone, PartialEq)]
pub enum GenreCreated {
    Created(Genre),
    Existing(Genre),
}

impl GenreCreated {
    pub fn genre(&self) -> &Genre {
        match self {
            GenreCreated::Created(genre) | GenreCreated::Existing(genre) => genre,
        }
    }
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
    guard: ReferentialGuard,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self {
            guard: ReferentialGuard::new(repository.clone()),
            repository,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn detail(&self, id: &str) -> AppResult<GenreDetail> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.get_by_id(id),
            self.repository.books.by_genre(id),
        )?;
        Ok(GenreDetail { genre, books })
    }

    pub async fn get(&self, id: &str) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create(&self, form: &GenreForm) -> AppResult<GenreCreated> {
        let data = form.clean().map_err(AppError::Validation)?;
        if let Some(existing) = self.repository.genres.find_by_name(&data.name).await? {
            tracing::info!("Genre create: name already used by id={}", existing.id);
            return Ok(GenreCreated::Existing(existing));
        }
        let genre = self.repository.genres.create(&data).await?;
        tracing::info!("Genre created: id={} name={}", genre.id, genre.name);
        Ok(GenreCreated::Created(genre))
    }

    /// Replace the genre's name, keeping names unique
    pub async fn update(&self, id: &str, form: &GenreForm) -> AppResult<Genre> {
        let data = form.clean().map_err(AppError::Validation)?;
        if let Some(existing) = self.repository.genres.find_by_name(&data.name).await? {
            if existing.id != id {
                return Err(AppError::Validation(FieldErrors::single(
                    "name",
                    "Genre name already exists",
                )));
            }
        }
        let genre = self.repository.genres.update(id, &data).await?;
        tracing::info!("Genre updated: id={}", genre.id);
        Ok(genre)
    }

    pub async fn delete_preview(&self, id: &str) -> AppResult<Option<Dependents<Genre, Book>>> {
        let (genre, check) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.guard.can_delete(Referenced::Genre(id)),
        )?;
        Ok(genre.map(|record| Dependents {
            record,
            blockers: check.blockers,
        }))
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, check) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.guard.can_delete(Referenced::Genre(id)),
        )?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Missing);
        };
        if !check.allowed {
            tracing::info!(
                "Genre delete refused: id={} still has {} book(s)",
                id,
                check.blockers.len()
            );
            return Ok(DeleteOutcome::Blocked(Dependents {
                record: genre,
                blockers: check.blockers,
            }));
        }
        self.repository.genres.delete(id).await?;
        tracing::info!("Genre deleted: id={}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
