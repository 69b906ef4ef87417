//! Resource data provider: the list and single-record operations an admin
//! UI issues against one table.
//!
//! List operations fetch the whole table and hand it to the query engine.
//! Single-record operations normalize the raw id first, so a malformed id
//! fails with [`DataError::InvalidId`] before the store is touched, while a
//! well-formed id that matches nothing fails with [`DataError::NotFound`].

use serde_json::{Map, Value};

use crate::error::DataError;
use crate::id::{normalize_or_throw, DocumentId};
use crate::page::ListResult;
use crate::query::{list_documents, list_reference, ListQuery, ReferenceQuery};
use crate::store::DocumentStore;

/// One table of a [`DocumentStore`].
///
/// # Example
///
/// ```ignore
/// let comments = Resource::new(store.clone(), "comments");
/// let page = comments
///     .get_many_reference(&ReferenceQuery::new("postId", post_id))
///     .await?;
/// ```
#[derive(Clone)]
pub struct Resource<S> {
    store: S,
    table: String,
}

impl<S: DocumentStore> Resource<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn normalize(&self, raw_id: &str) -> Result<DocumentId, DataError> {
        normalize_or_throw(&self.store, raw_id, &self.table)
    }

    /// Normalize every id up front so that nothing is written when one is malformed.
    fn normalize_all(&self, raw_ids: &[impl AsRef<str>]) -> Result<Vec<DocumentId>, DataError> {
        raw_ids.iter().map(|raw| self.normalize(raw.as_ref())).collect()
    }

    pub async fn get_list(&self, query: &ListQuery) -> Result<ListResult<Value>, DataError> {
        let records = self.store.fetch_all(&self.table).await?;
        Ok(list_documents(records, query))
    }

    pub async fn get_many_reference(&self, query: &ReferenceQuery) -> Result<ListResult<Value>, DataError> {
        let records = self.store.fetch_all(&self.table).await?;
        Ok(list_reference(records, query))
    }

    pub async fn get_one(&self, raw_id: &str) -> Result<Value, DataError> {
        let id = self.normalize(raw_id)?;
        self.store
            .get(&id)
            .await?
            .ok_or_else(|| DataError::not_found(&self.table, &id))
    }

    /// Fetch several records by id. Ids that match nothing are skipped.
    pub async fn get_many(&self, raw_ids: &[impl AsRef<str>]) -> Result<Vec<Value>, DataError> {
        let ids = self.normalize_all(raw_ids)?;
        let mut found = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(doc) = self.store.get(id).await? {
                found.push(doc);
            }
        }
        Ok(found)
    }

    pub async fn create(&self, fields: Map<String, Value>) -> Result<Value, DataError> {
        let doc = self.store.insert(&self.table, fields).await?;
        tracing::info!(table = %self.table, id = ?doc.get(crate::store::ID_FIELD), "record created");
        Ok(doc)
    }

    pub async fn update(&self, raw_id: &str, fields: Map<String, Value>) -> Result<Value, DataError> {
        let id = self.normalize(raw_id)?;
        self.store
            .patch(&id, fields)
            .await?
            .ok_or_else(|| DataError::not_found(&self.table, &id))
    }

    /// Patch several records. Returns the ids that existed and were updated.
    pub async fn update_many(
        &self,
        raw_ids: &[impl AsRef<str>],
        fields: Map<String, Value>,
    ) -> Result<Vec<String>, DataError> {
        let ids = self.normalize_all(raw_ids)?;
        let mut updated = Vec::new();
        for id in ids {
            if self.store.patch(&id, fields.clone()).await?.is_some() {
                updated.push(id.to_string());
            }
        }
        tracing::info!(table = %self.table, count = updated.len(), "records updated");
        Ok(updated)
    }

    /// Delete one record and return it.
    pub async fn delete(&self, raw_id: &str) -> Result<Value, DataError> {
        let id = self.normalize(raw_id)?;
        let removed = self
            .store
            .delete(&id)
            .await?
            .ok_or_else(|| DataError::not_found(&self.table, &id))?;
        tracing::info!(table = %self.table, %id, "record deleted");
        Ok(removed)
    }

    /// Delete several records. Returns the ids that existed and were removed.
    pub async fn delete_many(&self, raw_ids: &[impl AsRef<str>]) -> Result<Vec<String>, DataError> {
        let ids = self.normalize_all(raw_ids)?;
        let mut deleted = Vec::new();
        for id in ids {
            if self.store.delete(&id).await?.is_some() {
                deleted.push(id.to_string());
            }
        }
        tracing::info!(table = %self.table, count = deleted.len(), "records deleted");
        Ok(deleted)
    }
}
