//! # backoffice-data
//!
//! Generic list/filter/sort/paginate engine for the back office, with the
//! identifier normalization and storage seams the resource handlers use.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`list_documents`] | filter → sort → paginate over an already-fetched record set |
//! | [`list_reference`] | the same, restricted to children of one parent record |
//! | [`normalize_or_throw`] | validate a raw id for a table, [`DataError::InvalidId`] otherwise |
//! | [`DocumentStore`] / [`InMemoryStore`] | storage capability and its process-local implementation |
//! | [`Resource`] | per-table data provider (`get_list`, `get_one`, `update`, ...) |
//! | [`ListParams`] | decode list descriptors from URL query strings |

pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod page;
pub mod params;
pub mod provider;
pub mod query;
pub mod sort;
pub mod store;
pub mod value;

pub use config::DataConfig;
pub use error::DataError;
pub use filter::{filter_records, FilterMap};
pub use id::{normalize_or_throw, DocumentId, IdNormalizer, TableScopedIds};
pub use page::{paginate, ListResult, Pagination};
pub use params::{decode_list_query, decode_reference_query, ListParams};
pub use provider::Resource;
pub use query::{list_documents, list_reference, ListQuery, ReferenceQuery};
pub use sort::{sort_records, SortOrder, SortSpec};
pub use store::{DocumentStore, InMemoryStore};
pub use value::{compare_values, resolve_path, strict_eq, Record};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{
        list_documents, list_reference, DataError, DocumentStore, ListQuery, ListResult,
        Pagination, ReferenceQuery, Resource, SortSpec,
    };
}
