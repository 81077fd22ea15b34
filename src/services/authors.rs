//! Author service

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    repository::Repository,
    services::guard::{DeleteOutcome, Dependents, Referenced, ReferentialGuard},
};

/// Author with the books written by them
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
    guard: ReferentialGuard,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            guard: ReferentialGuard::new(repository.clone()),
            repository,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn detail(&self, id: &str) -> AppResult<AuthorDetail> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.get_by_id(id),
            self.repository.books.by_author(id),
        )?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn get(&self, id: &str) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Author> {
        let data = form.clean().map_err(AppError::Validation)?;
        let author = self.repository.authors.create(&data).await?;
        tracing::info!("Author created: id={} name={}", author.id, author.name());
        Ok(author)
    }

    /// Replace every field of the author
    pub async fn update(&self, id: &str, form: &AuthorForm) -> AppResult<Author> {
        let data = form.clean().map_err(AppError::Validation)?;
        let author = self.repository.authors.update(id, &data).await?;
        tracing::info!("Author updated: id={}", author.id);
        Ok(author)
    }

    /// Author and the books that would block its deletion; `None` if it is gone
    pub async fn delete_preview(&self, id: &str) -> AppResult<Option<Dependents<Author, Book>>> {
        let (author, check) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.guard.can_delete(Referenced::Author(id)),
        )?;
        Ok(author.map(|record| Dependents {
            record,
            blockers: check.blockers,
        }))
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, check) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.guard.can_delete(Referenced::Author(id)),
        )?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::Missing);
        };
        if !check.allowed {
            tracing::info!(
                "Author delete refused: id={} still has {} book(s)",
                id,
                check.blockers.len()
            );
            return Ok(DeleteOutcome::Blocked(Dependents {
                record: author,
                blockers: check.blockers,
            }));
        }
        self.repository.authors.delete(id).await?;
        tracing::info!("Author deleted: id={}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::{
        models::BookData,
        store::{MemoryStore, MockDocumentStore},
    };

    fn service() -> (AuthorsService, Repository) {
        let repository = Repository::new(Arc::new(MemoryStore::new()));
        (AuthorsService::new(repository.clone()), repository)
    }

    fn form(first: &str, family: &str, born: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: born.to_string(),
            date_of_death: String::new(),
        }
    }

    async fn add_book(repository: &Repository, author_id: &str, title: &str) {
        repository
            .books
            .create(&BookData {
                title: title.to_string(),
                author: author_id.to_string(),
                summary: "s".to_string(),
                isbn: "i".to_string(),
                genre: vec![],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_detail() {
        let (service, repository) = service();
        let author = assert_ok!(service.create(&form("Jane", "Austen", "1775-12-16")).await);
        assert_eq!(author.name(), "Austen, Jane");
        assert!(author.lifespan().starts_with("Dec 16, 1775"));

        add_book(&repository, &author.id, "Emma").await;
        let detail = service.detail(&author.id).await.unwrap();
        assert_eq!(detail.author, author);
        assert_eq!(detail.books.len(), 1);
    }

    #[tokio::test]
    async fn test_list_sorted_by_family_name() {
        let (service, _) = service();
        service.create(&form("Mary", "Shelley", "")).await.unwrap();
        service.create(&form("Jane", "Austen", "")).await.unwrap();
        service.create(&form("Bram", "Stoker", "")).await.unwrap();
        let names: Vec<String> = service.list().await.unwrap().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Austen, Jane", "Shelley, Mary", "Stoker, Bram"]);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let (service, _) = service();
        let author = service.create(&form("Jane", "Austen", "1775-12-16")).await.unwrap();
        let updated = service
            .update(&author.id, &form("Charlotte", "Bronte", ""))
            .await
            .unwrap();
        let fetched = service.get(&author.id).await.unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(fetched.first_name, "Charlotte");
        assert_eq!(fetched.date_of_birth, None);
    }

    #[tokio::test]
    async fn test_update_invalid_or_missing() {
        let (service, _) = service();
        let author = service.create(&form("Jane", "Austen", "")).await.unwrap();
        let err = assert_err!(service.update(&author.id, &form("", "Austen", "")).await);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.get(&author.id).await.unwrap().first_name, "Jane");

        let err = assert_err!(service.update("nope", &form("Jane", "Austen", "")).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_books() {
        let (service, repository) = service();
        let author = service.create(&form("Jane", "Austen", "")).await.unwrap();
        add_book(&repository, &author.id, "Emma").await;
        add_book(&repository, &author.id, "Persuasion").await;

        match service.delete(&author.id).await.unwrap() {
            DeleteOutcome::Blocked(dependents) => {
                assert_eq!(dependents.record.id, author.id);
                assert_eq!(dependents.blockers.len(), 2);
            }
            other => panic!("expected a refused delete, got {:?}", other),
        }
        assert_eq!(repository.authors.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_unreferenced() {
        let (service, _) = service();
        let author = service.create(&form("Jane", "Austen", "")).await.unwrap();
        let preview = service.delete_preview(&author.id).await.unwrap().unwrap();
        assert!(preview.blockers.is_empty());

        assert_eq!(service.delete(&author.id).await.unwrap(), DeleteOutcome::Deleted);
        assert!(matches!(service.get(&author.id).await, Err(AppError::NotFound(_))));
        assert_eq!(service.delete(&author.id).await.unwrap(), DeleteOutcome::Missing);
        assert!(service.delete_preview(&author.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_create_never_touches_store() {
        // No expectations: any store call panics
        let store = MockDocumentStore::new();
        let service = AuthorsService::new(Repository::new(Arc::new(store)));
        let err = service.create(&form("J@ne", "", "")).await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_failure_aborts_detail() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_by_id()
            .returning(|_, _| Err(AppError::Internal("connection reset".to_string())));
        store.expect_find().returning(|_, _, _| Ok(vec![]));
        let service = AuthorsService::new(Repository::new(Arc::new(store)));
        assert!(matches!(service.detail("a1").await, Err(AppError::Internal(_))));
    }
}
