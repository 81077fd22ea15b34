//! Document store layer
//!
//! Each entity type lives in its own collection of JSON documents addressed by
//! opaque string ids. The store is injected as an `Arc<dyn DocumentStore>`;
//! [`MemoryStore`] keeps documents in process and [`PgDocumentStore`] keeps
//! them in a PostgreSQL `JSONB` table.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::AppResult;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// A stored document and its id
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

impl Document {
    /// Decode into a model, exposing the store id as its `id` field
    pub fn decode<T: DeserializeOwned>(self) -> AppResult<T> {
        let Document { id, mut body } = self;
        if let Value::Object(ref mut map) = body {
            map.insert("id".to_string(), Value::String(id));
        }
        Ok(serde_json::from_value(body)?)
    }
}

pub fn decode_all<T: DeserializeOwned>(documents: Vec<Document>) -> AppResult<Vec<T>> {
    documents.into_iter().map(Document::decode).collect()
}

pub fn encode<T: Serialize>(data: &T) -> AppResult<Value> {
    Ok(serde_json::to_value(data)?)
}

/// Query filter on top-level document fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    /// Field equals the value, or is an array containing it
    Eq(&'static str, String),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn matches(&self, body: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => match body.get(*field) {
                Some(Value::String(s)) => s == expected,
                Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(expected)),
                _ => false,
            },
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// Insertion order
    Natural,
    /// Ascending on a string field
    Ascending(&'static str),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: &Filter, sort: Sort) -> AppResult<Vec<Document>>;

    async fn find_by_id(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// First match in insertion order
    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Document>>;

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<u64>;

    /// Store a new document under a freshly assigned id
    async fn insert(&self, collection: &str, body: Value) -> AppResult<Document>;

    /// Replace the whole body of an existing document; `None` if the id is unknown
    async fn replace(&self, collection: &str, id: &str, body: Value) -> AppResult<Option<Document>>;

    /// Returns whether a document was removed
    async fn remove(&self, collection: &str, id: &str) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

/// Opaque document id
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shelf {
        id: String,
        label: String,
    }

    #[test]
    fn test_filter_matches_scalar_and_array() {
        let body = json!({ "author": "a1", "genre": ["g1", "g2"] });
        assert!(Filter::eq("author", "a1").matches(&body));
        assert!(!Filter::eq("author", "a2").matches(&body));
        assert!(Filter::eq("genre", "g2").matches(&body));
        assert!(!Filter::eq("genre", "g3").matches(&body));
        assert!(!Filter::eq("missing", "x").matches(&body));
        assert!(Filter::All.matches(&body));
    }

    #[test]
    fn test_decode_injects_id() {
        let doc = Document {
            id: "abc".to_string(),
            body: json!({ "label": "Top" }),
        };
        let shelf: Shelf = doc.decode().unwrap();
        assert_eq!(
            shelf,
            Shelf {
                id: "abc".to_string(),
                label: "Top".to_string()
            }
        );
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
        assert_eq!(new_id().len(), 32);
    }
}
