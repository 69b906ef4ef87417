use backoffice_data::filter::filter_records;
use backoffice_data::{
    compare_values, list_documents, list_reference, paginate, resolve_path, sort_records,
    strict_eq, FilterMap, ListQuery, ListResult, Pagination, ReferenceQuery, SortSpec,
};
use serde_json::{json, Value};
use std::cmp::Ordering;

fn users() -> Vec<Value> {
    vec![
        json!({"id": "u1", "name": "Carol", "role": "admin", "age": 41, "address": {"city": "Lyon"}}),
        json!({"id": "u2", "name": "Alice", "role": "viewer", "age": null, "address": {"city": "Paris"}}),
        json!({"id": "u3", "name": "Bob", "role": "admin", "address": {"city": "Paris"}}),
        json!({"id": "u4", "name": "Dave", "role": "editor", "age": 29}),
        json!({"id": "u5", "name": "Erin", "role": "admin", "age": 29, "address": {"city": "Lyon"}}),
        json!({"id": "u6", "name": "Frank", "role": "viewer", "age": 55, "address": null}),
    ]
}

fn ids(records: &[Value]) -> Vec<&str> {
    records.iter().map(|r| r["id"].as_str().unwrap()).collect()
}

// ── Filter ──

#[test]
fn filter_identity_for_empty_descriptor() {
    let out = filter_records(users(), Some(&FilterMap::new()));
    assert_eq!(out, users());
}

#[test]
fn filter_selectivity_matches_resolution() {
    let cases = [
        ("role", json!("admin")),
        ("address.city", json!("Paris")),
        ("age", json!(29)),
        ("age", json!("29")),
        ("address.city.length", json!(5)),
    ];
    for (path, expected) in cases {
        let filter: FilterMap = [(path.to_string(), expected.clone())].into_iter().collect();
        let kept = filter_records(users(), Some(&filter));
        let wanted: Vec<Value> = users()
            .into_iter()
            .filter(|r| resolve_path(r, path).is_some_and(|v| strict_eq(v, &expected)))
            .collect();
        assert_eq!(kept, wanted, "filter on {path}");
    }
}

#[test]
fn filter_on_string_number_does_not_coerce() {
    let filter: FilterMap = [("age".to_string(), json!("29"))].into_iter().collect();
    assert!(filter_records(users(), Some(&filter)).is_empty());
}

// ── Sort ──

#[test]
fn sort_nulls_last_in_both_directions() {
    for spec in [SortSpec::asc("age"), SortSpec::desc("age")] {
        let sorted = sort_records(users(), Some(&spec));
        let first_null = sorted
            .iter()
            .position(|r| r.get("age").map_or(true, Value::is_null))
            .unwrap();
        assert!(
            sorted[first_null..]
                .iter()
                .all(|r| r.get("age").map_or(true, Value::is_null)),
            "{spec:?}"
        );
        assert_eq!(first_null, 4, "{spec:?}");
    }
}

#[test]
fn sort_ascending_and_descending_with_ties_stable() {
    let asc = sort_records(users(), Some(&SortSpec::asc("age")));
    assert_eq!(ids(&asc), vec!["u4", "u5", "u1", "u6", "u2", "u3"]);
    let desc = sort_records(users(), Some(&SortSpec::desc("age")));
    assert_eq!(ids(&desc), vec!["u6", "u1", "u4", "u5", "u2", "u3"]);
}

/// 64 records whose `v` cycles through every JSON type, plus absent, with
/// repeated values so that every type has ties.
fn mixed_records() -> Vec<Value> {
    (0..64u64)
        .map(|seq| {
            let v = match seq % 8 {
                0 => Some(json!(seq % 5)),
                1 => Some(json!(format!("s{}", seq % 3))),
                2 => Some(json!([seq % 2])),
                3 => Some(Value::Null),
                4 => None,
                5 => Some(json!((seq % 4) as f64 + 0.5)),
                6 => Some(json!(seq % 3 == 0)),
                _ => Some(json!({"n": seq})),
            };
            match v {
                Some(v) => json!({"seq": seq, "v": v}),
                None => json!({"seq": seq}),
            }
        })
        .collect()
}

#[test]
fn sort_mixed_types_is_total_nulls_last_and_stable() {
    for spec in [SortSpec::asc("v"), SortSpec::desc("v")] {
        let sorted = sort_records(mixed_records(), Some(&spec));
        assert_eq!(sorted.len(), 64);

        let nullish = |r: &Value| r.get("v").map_or(true, Value::is_null);
        let first_null = sorted.iter().position(nullish).unwrap();
        assert_eq!(first_null, 48, "{spec:?}");
        assert!(sorted[first_null..].iter().all(nullish), "{spec:?}");

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let seq_a = a["seq"].as_u64().unwrap();
            let seq_b = b["seq"].as_u64().unwrap();
            if nullish(a) && nullish(b) {
                assert!(seq_a < seq_b, "null ties reordered: {a} {b}");
                continue;
            }
            if nullish(b) {
                continue;
            }
            let ord = compare_values(&a["v"], &b["v"]);
            let out_of_order = if spec == SortSpec::asc("v") {
                Ordering::Greater
            } else {
                Ordering::Less
            };
            assert_ne!(ord, out_of_order, "{spec:?}: {a} before {b}");
            if ord == Ordering::Equal {
                assert!(seq_a < seq_b, "{spec:?}: ties reordered: {a} {b}");
            }
        }
    }
}

#[test]
fn sort_mixed_types_groups_by_type() {
    let sorted = sort_records(mixed_records(), Some(&SortSpec::asc("v")));
    let kinds: Vec<&str> = sorted[..48]
        .iter()
        .map(|r| match &r["v"] {
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            _ => "object",
        })
        .collect();
    let mut expected = Vec::new();
    for kind in ["bool", "number", "string", "array", "object"] {
        let n = if kind == "number" { 16 } else { 8 };
        expected.extend(std::iter::repeat(kind).take(n));
    }
    assert_eq!(kinds, expected);
}

#[test]
fn sort_on_nested_path() {
    let sorted = sort_records(users(), Some(&SortSpec::asc("address.city")));
    assert_eq!(ids(&sorted), vec!["u1", "u5", "u2", "u3", "u4", "u6"]);
}

#[test]
fn sort_does_not_touch_caller_copy() {
    let original = users();
    let _ = sort_records(original.clone(), Some(&SortSpec::asc("name")));
    assert_eq!(original, users());
}

// ── Paginate ──

#[test]
fn pagination_total_invariant() {
    for per_page in 1..=7u64 {
        for page in -1..=8i64 {
            let r = paginate(users(), Some(&Pagination::new(page, per_page)));
            assert_eq!(r.total, users().len());
        }
    }
}

#[test]
fn pagination_coverage_reconstructs_input() {
    for per_page in 1..=7u64 {
        let mut rebuilt = Vec::new();
        let mut page = 1;
        loop {
            let r = paginate(users(), Some(&Pagination::new(page, per_page)));
            if r.data.is_empty() {
                break;
            }
            rebuilt.extend(r.data);
            page += 1;
        }
        assert_eq!(rebuilt, users(), "perPage = {per_page}");
    }
}

// ── Composition ──

#[test]
fn pipeline_order_is_filter_sort_paginate() {
    let records = vec![
        json!({"a": 1, "f": "z"}),
        json!({"a": 2, "f": "a"}),
        json!({"a": 1, "f": "m"}),
    ];
    let query = ListQuery::new()
        .filter_eq("a", 1)
        .sort(SortSpec::asc("f"))
        .paginate(Pagination::new(2, 1));
    let result = list_documents(records, &query);
    assert_eq!(result.data, vec![json!({"a": 1, "f": "z"})]);
    assert_eq!(result.total, 2);
}

#[test]
fn total_reflects_filter_not_page() {
    let query = ListQuery::new()
        .filter_eq("role", "admin")
        .sort(SortSpec::desc("name"))
        .paginate(Pagination::new(1, 2));
    let result = list_documents(users(), &query);
    assert_eq!(result.total, 3);
    assert_eq!(ids(&result.data), vec!["u5", "u1"]);
    assert_eq!(result.page_count(2), 2);
}

#[test]
fn reference_list_equals_manual_filter() {
    let comments = vec![
        json!({"id": "c1", "postId": "p1", "body": "first"}),
        json!({"id": "c2", "postId": "p2", "body": "other"}),
        json!({"id": "c3", "postId": "p1", "body": "second"}),
        json!({"id": "c4", "body": "orphan"}),
    ];
    let reference = ReferenceQuery::new("postId", "p1");
    let via_reference = list_reference(comments.clone(), &reference);
    let manual = list_documents(comments, &ListQuery::new().filter_eq("postId", "p1"));
    assert_eq!(via_reference, manual);
    assert_eq!(ids(&via_reference.data), vec!["c1", "c3"]);
}

#[test]
fn empty_collection_is_empty_result() {
    let result = list_documents(Vec::<Value>::new(), &ListQuery::default());
    assert_eq!(result, ListResult { data: vec![], total: 0 });
}

#[test]
fn unknown_fields_degrade_gracefully() {
    let query = ListQuery::new()
        .sort(SortSpec::asc("does.not.exist"))
        .paginate(Pagination::new(40, 10));
    let result = list_documents(users(), &query);
    assert!(result.data.is_empty());
    assert_eq!(result.total, 6);
}

#[test]
fn map_records_work_through_the_engine() {
    let records: Vec<serde_json::Map<String, Value>> = users()
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
    let result = list_documents(records, &ListQuery::new().filter_eq("address.city", "Lyon"));
    assert_eq!(result.total, 2);
}
