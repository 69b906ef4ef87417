use std::collections::BTreeMap;

use serde_json::Value;

use crate::value::{strict_eq, Record};

/// Field path -> required value. All entries are ANDed.
pub type FilterMap = BTreeMap<String, Value>;

/// Keep the records whose every filtered path resolves to a strictly equal value.
///
/// An absent or empty filter returns the input untouched.
pub fn filter_records<T: Record>(records: Vec<T>, filters: Option<&FilterMap>) -> Vec<T> {
    match filters {
        Some(filters) if !filters.is_empty() => records
            .into_iter()
            .filter(|record| matches(record, filters))
            .collect(),
        _ => records,
    }
}

/// Whether a single record satisfies every entry of `filters`.
pub fn matches<T: Record>(record: &T, filters: &FilterMap) -> bool {
    filters.iter().all(|(path, expected)| {
        record
            .field(path)
            .is_some_and(|actual| strict_eq(actual, expected))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter_of(entries: &[(&str, Value)]) -> FilterMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let records = vec![json!({"a": 1}), json!({"b": 2}), json!({"a": 1})];
        assert_eq!(filter_records(records.clone(), None), records);
        assert_eq!(filter_records(records.clone(), Some(&FilterMap::new())), records);
    }

    #[test]
    fn entries_are_anded() {
        let records = vec![
            json!({"role": "admin", "active": true}),
            json!({"role": "admin", "active": false}),
            json!({"role": "viewer", "active": true}),
        ];
        let f = filter_of(&[("role", json!("admin")), ("active", json!(true))]);
        assert_eq!(filter_records(records, Some(&f)), vec![json!({"role": "admin", "active": true})]);
    }

    #[test]
    fn nested_paths_and_strict_types() {
        let records = vec![
            json!({"id": 1, "address": {"zip": "1"}}),
            json!({"id": 2, "address": {"zip": 1}}),
            json!({"id": 3}),
        ];
        let f = filter_of(&[("address.zip", json!("1"))]);
        let kept = filter_records(records, Some(&f));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["id"], 1);
    }

    #[test]
    fn explicit_null_matches_only_null() {
        let records = vec![json!({"id": 1, "deletedAt": null}), json!({"id": 2})];
        let f = filter_of(&[("deletedAt", Value::Null)]);
        let kept = filter_records(records, Some(&f));
        assert_eq!(kept, vec![json!({"id": 1, "deletedAt": null})]);
    }
}
