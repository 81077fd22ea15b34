//! In-process document store

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{new_id, Document, DocumentStore, Filter, Sort};
use crate::error::AppResult;

/// Collections of documents kept in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, IndexMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_key<'a>(doc: &'a Document, field: &str) -> &'a str {
    doc.body.get(field).and_then(Value::as_str).unwrap_or("")
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Sort,
    ) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, body)| filter.matches(body))
                    .map(|(id, body)| Document {
                        id: id.clone(),
                        body: body.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Sort::Ascending(field) = sort {
            documents.sort_by(|a, b| sort_key(a, field).cmp(sort_key(b, field)));
        }
        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|body| Document {
                id: id.to_string(),
                body: body.clone(),
            }))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(_, body)| filter.matches(body))
                .map(|(id, body)| Document {
                    id: id.clone(),
                    body: body.clone(),
                })
        }))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().filter(|body| filter.matches(body)).count() as u64)
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, body: Value) -> AppResult<Document> {
        let id = new_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), body.clone());
        Ok(Document { id, body })
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        body: Value,
    ) -> AppResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(slot) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(None);
        };
        *slot = body.clone();
        Ok(Some(Document {
            id: id.to_string(),
            body,
        }))
    }

    async fn remove(&self, collection: &str, id: &str) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.shift_remove(id))
            .is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
