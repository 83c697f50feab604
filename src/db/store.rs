// src/db/store.rs
// DOCUMENTATION: Document store contract shared by all backends
// PURPOSE: Keep handlers and services independent of where documents live

use crate::db::Filter;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// A schema-less record as stored in a collection
pub type Document = Map<String, Value>;

/// Reserved key under which every returned document carries its identifier
pub const ID_KEY: &str = "_id";

/// Handle shared between actix workers
pub type SharedStore = Arc<dyn DocumentStore>;

/// Failures raised by a document store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached (pool closed, connection refused, ...)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend was reached but the operation failed
    #[error("query failed: {0}")]
    Query(String),

    /// A stored document could not be read back in the expected shape
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
                StoreError::Malformed(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Generic access to collections of documents
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request handler.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist one document and return its assigned identifier
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, StoreError>;

    /// Return documents of `collection` matching `filter`, at most `limit` of them.
    /// Each returned document carries its identifier under [`ID_KEY`].
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Names of collections holding at least one document
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Short backend name for diagnostics
    fn backend(&self) -> &'static str;
}

/// Read the identifier of a stored document as a plain string
///
/// Accepts string ids, numeric ids and extended-JSON object ids (`{"$oid": ".."}`).
/// Returns `None` when the key is absent or holds anything else.
pub fn document_id(document: &Document) -> Option<String> {
    match document.get(ID_KEY)? {
        Value::String(id) => Some(id.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(inner) => match inner.get("$oid") {
            Some(Value::String(oid)) => Some(oid.clone()),
            _ => None,
        },
        _ => None,
    }
}
