//! PostgreSQL document store
//!
//! Documents live in a single `documents` table (see `migrations/`), keyed by
//! collection and id, with the body stored as `JSONB`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Pool, Postgres};

use super::{new_id, Document, DocumentStore, Filter, Sort};
use crate::error::AppResult;

const FIELD_MATCH: &str = concat!(
    " AND (body -> $2::text = to_jsonb($3::text)",
    " OR body -> $2::text @> jsonb_build_array($3::text))"
);

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
}

impl PgDocumentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// WHERE clause for `filter`, and the index of the next free bind parameter
fn where_clause(filter: &Filter) -> (String, usize) {
    match filter {
        Filter::All => ("WHERE collection = $1".to_string(), 2),
        Filter::Eq(..) => (format!("WHERE collection = $1{}", FIELD_MATCH), 4),
    }
}

/// ORDER BY clause for `sort`; field order is byte-wise, like `MemoryStore`
fn order_clause(sort: Sort, param: usize) -> String {
    match sort {
        Sort::Natural => "ORDER BY seq".to_string(),
        Sort::Ascending(_) => format!("ORDER BY body ->> ${}::text COLLATE \"C\", seq", param),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Sort,
    ) -> AppResult<Vec<Document>> {
        let (clause, next) = where_clause(filter);
        let sql = format!(
            "SELECT id, body FROM documents {} {}",
            clause,
            order_clause(sort, next)
        );

        let mut query = sqlx::query_as::<_, (String, Value)>(&sql).bind(collection);
        if let Filter::Eq(field, value) = filter {
            query = query.bind(*field).bind(value.as_str());
        }
        if let Sort::Ascending(field) = sort {
            query = query.bind(field);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(id, body)| Document { id, body })
            .collect())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let row = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, body)| Document { id, body }))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Document>> {
        let (clause, _) = where_clause(filter);
        let sql = format!("SELECT id, body FROM documents {} ORDER BY seq LIMIT 1", clause);

        let mut query = sqlx::query_as::<_, (String, Value)>(&sql).bind(collection);
        if let Filter::Eq(field, value) = filter {
            query = query.bind(*field).bind(value.as_str());
        }

        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.map(|(id, body)| Document { id, body }))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<u64> {
        let (clause, _) = where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM documents {}", clause);

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(collection);
        if let Filter::Eq(field, value) = filter {
            query = query.bind(*field).bind(value.as_str());
        }

        let count = query.fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, collection: &str, body: Value) -> AppResult<Document> {
        let id = new_id();
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(&body)
            .execute(&self.pool)
            .await?;
        Ok(Document { id, body })
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        body: Value,
    ) -> AppResult<Option<Document>> {
        let result = sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .bind(&body)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Document {
            id: id.to_string(),
            body,
        }))
    }

    async fn remove(&self, collection: &str, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_parameters() {
        let (clause, next) = where_clause(&Filter::All);
        assert_eq!(clause, "WHERE collection = $1");
        assert_eq!(next, 2);

        let (clause, next) = where_clause(&Filter::eq("author", "a1"));
        assert!(clause.contains("$3::text"));
        assert_eq!(next, 4);
    }

    #[test]
    fn test_order_clause_is_bytewise() {
        assert_eq!(order_clause(Sort::Natural, 2), "ORDER BY seq");
        assert_eq!(
            order_clause(Sort::Ascending("title"), 4),
            r#"ORDER BY body ->> $4::text COLLATE "C", seq"#
        );
    }
}
