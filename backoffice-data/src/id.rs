//! Identifier normalization.
//!
//! Raw ids arrive as opaque strings from clients. Before any single-record
//! fetch, patch or delete they are checked against the storage layer's id
//! shape for the target table. A malformed id is a client error
//! ([`DataError::InvalidId`]); a well-formed id that matches nothing is left
//! for the caller to report as [`DataError::NotFound`].

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::DataError;

/// A validated identifier, bound to the table it was normalized for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    table: String,
    value: String,
}

impl DocumentId {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// The storage layer's id-validation capability.
pub trait IdNormalizer {
    /// Return the typed id when `raw` is a well-formed id for `table`.
    fn normalize_id(&self, table: &str, raw: &str) -> Option<DocumentId>;
}

/// Ids of the form `<table>_<32 lowercase hex digits>`.
///
/// The hex part is a v4 UUID in simple form, so ids minted for one table are
/// never valid for another.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableScopedIds;

impl TableScopedIds {
    /// Mint a fresh id for `table`.
    pub fn generate(&self, table: &str) -> DocumentId {
        DocumentId {
            table: table.to_string(),
            value: format!("{table}_{}", Uuid::new_v4().simple()),
        }
    }
}

impl IdNormalizer for TableScopedIds {
    fn normalize_id(&self, table: &str, raw: &str) -> Option<DocumentId> {
        let suffix = raw.strip_prefix(table)?.strip_prefix('_')?;
        let is_simple_uuid = suffix.len() == 32
            && suffix.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
            && Uuid::try_parse(suffix).is_ok();
        is_simple_uuid.then(|| DocumentId {
            table: table.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Validate `raw` as an id for `table`, failing with [`DataError::InvalidId`].
///
/// Existence is not checked here.
pub fn normalize_or_throw<N: IdNormalizer + ?Sized>(
    normalizer: &N,
    raw: &str,
    table: &str,
) -> Result<DocumentId, DataError> {
    normalizer.normalize_id(table, raw).ok_or_else(|| {
        tracing::debug!(table, id = raw, "rejected malformed id");
        DataError::invalid_id(table, raw)
    })
}
