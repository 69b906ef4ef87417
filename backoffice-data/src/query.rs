//! Composed list queries: filter, then sort, then paginate.
//!
//! The order matters. `total` must count the filtered set before the page
//! is cut, and a page must be taken from the fully sorted set.
//!
//! # Example
//!
//! ```ignore
//! let query = ListQuery::new()
//!     .filter_eq("role", "admin")
//!     .sort(SortSpec::desc("createdAt"))
//!     .paginate(Pagination::new(2, 25));
//! let page = list_documents(users, &query);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::{filter_records, FilterMap};
use crate::page::{paginate, ListResult, Pagination};
use crate::sort::{sort_records, SortSpec};
use crate::value::Record;

/// Declarative list descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterMap>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Add an equality filter on `path`, creating the filter map if needed.
    pub fn filter_eq(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.filter
            .get_or_insert_with(FilterMap::new)
            .insert(path.to_string(), value.into());
        self
    }
}

/// List query restricted to the children of one parent record.
///
/// `target` is the foreign-key path on the child records, `id` the parent id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceQuery {
    pub target: String,
    pub id: String,
    #[serde(flatten)]
    pub query: ListQuery,
}

impl ReferenceQuery {
    pub fn new(target: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            id: id.into(),
            query: ListQuery::default(),
        }
    }

    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    /// The equivalent plain list query with `target == id` merged into the filter.
    pub fn to_list_query(&self) -> ListQuery {
        self.query
            .clone()
            .filter_eq(&self.target, Value::String(self.id.clone()))
    }
}

/// Run `query` over an already-fetched record set.
pub fn list_documents<T: Record>(records: Vec<T>, query: &ListQuery) -> ListResult<T> {
    let fetched = records.len();
    let filtered = filter_records(records, query.filter.as_ref());
    let sorted = sort_records(filtered, query.sort.as_ref());
    let result = paginate(sorted, query.pagination.as_ref());
    tracing::debug!(
        fetched,
        total = result.total,
        returned = result.data.len(),
        "list query evaluated"
    );
    result
}

/// List the records whose `query.target` equals `query.id`.
pub fn list_reference<T: Record>(records: Vec<T>, query: &ReferenceQuery) -> ListResult<T> {
    list_documents(records, &query.to_list_query())
}
