use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::DataError;
use crate::id::{DocumentId, IdNormalizer, TableScopedIds};

/// Key under which every stored document carries its own id.
pub const ID_FIELD: &str = "id";

/// Storage capability consumed by the resource providers.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait` needed.
pub trait DocumentStore: IdNormalizer + Send + Sync {
    /// Every document of `table`, in insertion order.
    fn fetch_all(&self, table: &str) -> impl Future<Output = Result<Vec<Value>, DataError>> + Send;

    fn get(&self, id: &DocumentId) -> impl Future<Output = Result<Option<Value>, DataError>> + Send;

    /// Store a new document and return it, id included.
    fn insert(
        &self,
        table: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<Value, DataError>> + Send;

    /// Shallow-merge `fields` into an existing document. `None` if it does not exist.
    fn patch(
        &self,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<Option<Value>, DataError>> + Send;

    /// Remove a document, returning it if it existed.
    fn delete(&self, id: &DocumentId) -> impl Future<Output = Result<Option<Value>, DataError>> + Send;
}

/// Process-local document store.
///
/// Cloning shares the underlying tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    ids: TableScopedIds,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently stored in `table`.
    pub async fn count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }
}

fn carries_id(doc: &Value, id: &DocumentId) -> bool {
    doc.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str())
}

impl IdNormalizer for InMemoryStore {
    fn normalize_id(&self, table: &str, raw: &str) -> Option<DocumentId> {
        self.ids.normalize_id(table, raw)
    }
}

impl DocumentStore for InMemoryStore {
    async fn fetch_all(&self, table: &str) -> Result<Vec<Value>, DataError> {
        Ok(self.tables.read().await.get(table).cloned().unwrap_or_default())
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Value>, DataError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(id.table())
            .and_then(|docs| docs.iter().find(|doc| carries_id(doc, id)))
            .cloned())
    }

    async fn insert(&self, table: &str, mut fields: Map<String, Value>) -> Result<Value, DataError> {
        let id = self.ids.generate(table);
        fields.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        let doc = Value::Object(fields);
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(doc.clone());
        tracing::debug!(table, %id, "document inserted");
        Ok(doc)
    }

    async fn patch(&self, id: &DocumentId, fields: Map<String, Value>) -> Result<Option<Value>, DataError> {
        let mut tables = self.tables.write().await;
        let Some(doc) = tables
            .get_mut(id.table())
            .and_then(|docs| docs.iter_mut().find(|doc| carries_id(doc, id)))
        else {
            return Ok(None);
        };
        let Value::Object(existing) = &mut *doc else {
            return Err(DataError::Other(format!("document {id} is not an object")));
        };
        for (key, value) in fields {
            if key != ID_FIELD {
                existing.insert(key, value);
            }
        }
        tracing::debug!(table = id.table(), %id, "document patched");
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, id: &DocumentId) -> Result<Option<Value>, DataError> {
        let mut tables = self.tables.write().await;
        let removed = tables.get_mut(id.table()).and_then(|docs| {
            let pos = docs.iter().position(|doc| carries_id(doc, id))?;
            Some(docs.remove(pos))
        });
        if removed.is_some() {
            tracing::debug!(table = id.table(), %id, "document deleted");
        }
        Ok(removed)
    }
}
