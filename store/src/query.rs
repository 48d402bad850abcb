//! Query predicates: equality filters and single-field ordering.
//!
//! This is the entire predicate language the tracker uses — no range
//! filters, no pagination, no cursors, no aggregates.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::{Document, DocumentSnapshot};

/// Exact-match equality filter on one top-level field.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub equals: Value,
}

impl Filter {
    pub fn field_eq(field: impl Into<String>, equals: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: equals.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Single-field sort order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Whether `doc` satisfies the conjunction of `filters`.
pub(crate) fn matches(doc: &Document, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| doc.get(&f.field) == Some(&f.equals))
}

/// Sort snapshots in place on the ordered field.
///
/// Documents missing the field sort before every document carrying it.
/// RFC 3339 timestamps compare correctly as strings, which is all the
/// ordering support `createdAt` needs.
pub(crate) fn sort_snapshots(snapshots: &mut [DocumentSnapshot], order: &OrderBy) {
    snapshots.sort_by(|a, b| {
        let ord = compare_values(a.fields.get(&order.field), b.fields.get(&order.field));
        match order.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        // Mixed types have no meaningful order; leave them stable.
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, Value)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn matches_is_a_conjunction() {
        let d = doc(&[("shift", json!("A")), ("isActive", json!(true))]);
        assert!(matches(&d, &[Filter::field_eq("shift", "A")]));
        assert!(matches(
            &d,
            &[
                Filter::field_eq("shift", "A"),
                Filter::field_eq("isActive", true),
            ]
        ));
        assert!(!matches(
            &d,
            &[
                Filter::field_eq("shift", "B"),
                Filter::field_eq("isActive", true),
            ]
        ));
    }

    #[test]
    fn missing_field_never_matches() {
        let d = doc(&[("shift", json!("A"))]);
        assert!(!matches(&d, &[Filter::field_eq("isActive", true)]));
    }

    #[test]
    fn descending_sort_on_timestamps() {
        let mut snaps = vec![
            DocumentSnapshot {
                id: "a".into(),
                fields: doc(&[("createdAt", json!("2026-01-01T00:00:00.000001Z"))]),
            },
            DocumentSnapshot {
                id: "b".into(),
                fields: doc(&[("createdAt", json!("2026-01-02T00:00:00.000001Z"))]),
            },
        ];
        sort_snapshots(&mut snaps, &OrderBy::desc("createdAt"));
        assert_eq!(snaps[0].id, "b");
        assert_eq!(snaps[1].id, "a");
    }
}
