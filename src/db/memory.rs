// src/db/memory.rs
// DOCUMENTATION: In-memory document store
// PURPOSE: Run without PostgreSQL (local development, tests)

use crate::db::{Document, DocumentStore, Filter, StoreError, ID_KEY};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory store
/// DOCUMENTATION: Collections are insertion-ordered vectors keyed by name.
/// Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryStore {
    data: RwLock<MemoryData>,
}

#[derive(Debug)]
struct MemoryData {
    collections: HashMap<String, Vec<Document>>,
    is_healthy: bool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(MemoryData {
                collections: HashMap::new(),
                is_healthy: true,
            }),
        }
    }

    /// Toggle availability; an unhealthy store fails every operation
    #[cfg(test)]
    pub fn set_healthy(&self, healthy: bool) {
        if let Ok(mut data) = self.data.write() {
            data.is_healthy = healthy;
        }
    }

    /// Number of documents in a collection
    #[cfg(test)]
    pub fn count(&self, collection: &str) -> usize {
        self.data
            .read()
            .map(|data| data.collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryData>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if !data.is_healthy {
            return Err(StoreError::Unavailable("in-memory store marked down".into()));
        }
        Ok(data)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryData>, StoreError> {
        let data = self
            .data
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if !data.is_healthy {
            return Err(StoreError::Unavailable("in-memory store marked down".into()));
        }
        Ok(data)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        document.insert(ID_KEY.to_string(), Value::String(id.clone()));

        let mut data = self.write()?;
        data.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        log::debug!("Stored document {} in {}", id, collection);
        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreError> {
        let data = self.read()?;
        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(0));

        Ok(data
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let data = self.read()?;
        let mut names: Vec<String> = data
            .collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryStore::new();
        let id = assert_ok!(store.create_document("place", doc(json!({"name": "Hampi"}))).await);

        let docs = assert_ok!(store.get_documents("place", &Filter::All, None).await);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get(ID_KEY), Some(&Value::String(id)));
        assert_eq!(docs[0].get("name"), Some(&json!("Hampi")));
    }

    #[tokio::test]
    async fn test_insertion_order_and_limit() {
        let store = InMemoryStore::new();
        for name in ["a", "b", "c"] {
            assert_ok!(store.create_document("place", doc(json!({"name": name}))).await);
        }

        let docs = assert_ok!(store.get_documents("place", &Filter::All, Some(2)).await);
        let names: Vec<_> = docs.iter().map(|d| d["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b")]);

        let none = assert_ok!(store.get_documents("place", &Filter::All, Some(0)).await);
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = InMemoryStore::new();
        assert_ok!(store.create_document("place", doc(json!({"name": "x"}))).await);
        assert_ok!(store.create_document("user", doc(json!({"name": "y"}))).await);

        assert_eq!(store.count("place"), 1);
        assert_eq!(store.count("user"), 1);
        assert_eq!(store.count("missing"), 0);

        let names = assert_ok!(store.list_collections().await);
        assert_eq!(names, vec!["place".to_string(), "user".to_string()]);
    }

    #[tokio::test]
    async fn test_filter_applied() {
        let store = InMemoryStore::new();
        assert_ok!(
            store
                .create_document("place", doc(json!({"name": "Mysore Palace", "category": "Palace"})))
                .await
        );
        assert_ok!(
            store
                .create_document("place", doc(json!({"name": "Gol Gumbaz", "category": "Monument"})))
                .await
        );

        let docs = assert_ok!(
            store
                .get_documents("place", &Filter::equals("category", "Palace"), None)
                .await
        );
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], json!("Mysore Palace"));
    }

    #[tokio::test]
    async fn test_unhealthy_store_fails() {
        let store = InMemoryStore::new();
        store.set_healthy(false);

        let err = assert_err!(store.get_documents("place", &Filter::All, None).await);
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_err!(store.create_document("place", Document::new()).await);

        store.set_healthy(true);
        assert_ok!(store.list_collections().await);
    }
}
