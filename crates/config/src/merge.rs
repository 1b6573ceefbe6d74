//! Deep merge of configuration groups.
//!
//! Responsibilities:
//! - Merge an overlay group on top of a base group, recursing into nested collections.
//! - Treat numeric keys and list elements as an append-only set deduplicated by value.
//!
//! Does NOT handle:
//! - Deciding which data is base and which is overlay (see `Container::load`).
//! - Alias strings or producers; they are merged like any other scalar.
//!
//! Invariants:
//! - Inputs are never mutated; the result is a fresh tree.
//! - Every base key absent from the overlay survives unchanged.
//! - The overlay wins on scalar collisions; collections on both sides are merged recursively.
//! - A numeric-keyed value is appended only if no equal value exists in the merged collection.

use crate::value::{Group, Value};

/// Recursively merge `overlay` on top of `base`.
///
/// ```
/// use cascade_config::{Value, group, merge};
///
/// let base = group([("name", Value::from("default")), ("debug", Value::from(false))]);
/// let overlay = group([("name", Value::from("test"))]);
///
/// let merged = merge(&base, &overlay);
/// assert_eq!(merged["name"], Value::from("test"));
/// assert_eq!(merged["debug"], Value::from(false));
/// ```
pub fn merge(base: &Group, overlay: &Group) -> Group {
    let mut merged = base.clone();
    merge_into_group(&mut merged, overlay);
    merged
}

/// Merge two values that are both collections.
///
/// Two lists stay a list; any other pairing is merged as groups, with list positions
/// becoming the keys `"0".."n-1"`.
fn merge_collections(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::List(b), Value::List(o)) => {
            let mut merged = b.clone();
            merge_into_list(&mut merged, o);
            Value::List(merged)
        }
        _ => {
            let mut merged = to_group(base);
            merge_into_group(&mut merged, &to_group(overlay));
            Value::Group(merged)
        }
    }
}

fn merge_into_group(merged: &mut Group, overlay: &Group) {
    for (key, value) in overlay {
        match merged.get(key) {
            Some(existing) if existing.is_collection() && value.is_collection() => {
                let combined = merge_collections(existing, value);
                merged.insert(key.clone(), combined);
            }
            _ if is_numeric_key(key) => {
                if !merged.values().any(|v| v == value) {
                    let next = next_index(merged);
                    merged.insert(next, value.clone());
                }
            }
            _ => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_into_list(merged: &mut Vec<Value>, overlay: &[Value]) {
    for (position, value) in overlay.iter().enumerate() {
        match merged.get(position) {
            Some(existing) if existing.is_collection() && value.is_collection() => {
                let combined = merge_collections(existing, value);
                merged[position] = combined;
            }
            _ => {
                if !merged.contains(value) {
                    merged.push(value.clone());
                }
            }
        }
    }
}

fn to_group(value: &Value) -> Group {
    match value {
        Value::Group(g) => g.clone(),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect(),
        _ => Group::new(),
    }
}

/// A key that reads as a number marks a list-style entry.
fn is_numeric_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Next free integer key: one past the largest integer key, or 0.
///
/// When the largest key is `i64::MAX` the first unused non-negative key is taken instead,
/// so an occupied entry is never overwritten.
fn next_index(group: &Group) -> String {
    let max = group.keys().filter_map(|k| k.parse::<i64>().ok()).max();
    let Some(max) = max else {
        return "0".to_string();
    };

    match max.checked_add(1) {
        Some(next) => next.max(0).to_string(),
        None => {
            tracing::warn!("Numeric config keys exhausted, reusing the first free index");
            (0..=i64::MAX)
                .map(|i| i.to_string())
                .find(|k| !group.contains_key(k))
                .unwrap_or_default()
        }
    }
}
