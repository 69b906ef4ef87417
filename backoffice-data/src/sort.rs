use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::{compare_values, is_nullish, Record};

/// Sort direction. Any order string other than `"DESC"` is ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        if s == "DESC" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

impl From<String> for SortOrder {
    fn from(s: String) -> Self {
        SortOrder::from(s.as_str())
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => "ASC".to_string(),
            SortOrder::Desc => "DESC".to_string(),
        }
    }
}

/// Single-field sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Asc }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Desc }
    }

    /// Compare two records on this spec's field.
    ///
    /// Null or absent values always sort after present ones, whatever the
    /// direction; only the comparison between two present values is reversed
    /// by `Desc`.
    pub fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        let left = a.field(&self.field);
        let right = b.field(&self.field);
        match (is_nullish(left), is_nullish(right)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = match (left, right) {
                    (Some(l), Some(r)) => compare_values(l, r),
                    _ => Ordering::Equal,
                };
                match self.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            }
        }
    }
}

/// Stable sort on `spec`; without a spec (or with an empty field) the input order is kept.
pub fn sort_records<T: Record>(mut records: Vec<T>, spec: Option<&SortSpec>) -> Vec<T> {
    if let Some(spec) = spec.filter(|s| !s.field.is_empty()) {
        records.sort_by(|a, b| spec.compare(a, b));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn names(records: &[Value]) -> Vec<&str> {
        records.iter().map(|r| r["name"].as_str().unwrap()).collect()
    }

    fn sample() -> Vec<Value> {
        vec![
            json!({"name": "n1", "rank": null}),
            json!({"name": "b", "rank": 2}),
            json!({"name": "n2"}),
            json!({"name": "a", "rank": 1}),
            json!({"name": "c", "rank": 2}),
        ]
    }

    #[test]
    fn nulls_last_ascending() {
        let sorted = sort_records(sample(), Some(&SortSpec::asc("rank")));
        assert_eq!(names(&sorted), vec!["a", "b", "c", "n1", "n2"]);
    }

    #[test]
    fn nulls_last_descending() {
        let sorted = sort_records(sample(), Some(&SortSpec::desc("rank")));
        assert_eq!(names(&sorted), vec!["b", "c", "a", "n1", "n2"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            json!({"name": "first", "group": "x"}),
            json!({"name": "second", "group": "x"}),
            json!({"name": "third", "group": "x"}),
        ];
        let asc = sort_records(records.clone(), Some(&SortSpec::asc("group")));
        let desc = sort_records(records, Some(&SortSpec::desc("group")));
        assert_eq!(names(&asc), vec!["first", "second", "third"]);
        assert_eq!(names(&desc), vec!["first", "second", "third"]);
    }

    #[test]
    fn no_spec_keeps_order() {
        assert_eq!(sort_records(sample(), None), sample());
        assert_eq!(sort_records(sample(), Some(&SortSpec::asc(""))), sample());
    }

    #[test]
    fn unknown_field_keeps_order() {
        assert_eq!(sort_records(sample(), Some(&SortSpec::desc("missing"))), sample());
    }

    #[test]
    fn order_strings() {
        assert_eq!(SortOrder::from("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::from("desc"), SortOrder::Asc);
        assert_eq!(SortOrder::from("ASC"), SortOrder::Asc);
        let spec: SortSpec = serde_json::from_value(json!({"field": "x", "order": "sideways"})).unwrap();
        assert_eq!(spec.order, SortOrder::Asc);
        assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), json!("DESC"));
    }
}
