//! Colon-path walking and alias resolution.
//!
//! Responsibilities:
//! - Traverse nested collections along a `:` separated path.
//! - Replace alias strings (`"#group"` / `"#group:path"`) with the data they point at,
//!   loading the target group on demand.
//!
//! Does NOT handle:
//! - Producer evaluation; the walk returns producers untouched (see `Container::evaluate`).
//!
//! Invariants:
//! - A missing key or a non-collection cursor yields the caller's default, never an error.
//! - Alias targets are loaded indexed with `reload = false`, so each group is read from the
//!   provider at most once per lookup chain.
//! - Provider failures during alias resolution are logged and yield the default.
//! - Alias chains stop at `MAX_ALIAS_DEPTH` and yield the default.

use super::Container;
use crate::constants::{ALIAS_SENTINEL, MAX_ALIAS_DEPTH, PATH_SEPARATOR};
use crate::value::Value;

impl Container {
    /// Walk `path` inside the sub-index `index_name`.
    pub(crate) fn walk(&mut self, index_name: &str, path: &str, default: &Value) -> Value {
        let mut cursor: Option<Value> = None;

        for key in path.split(PATH_SEPARATOR) {
            let next = match &cursor {
                None => self.items.get(index_name).and_then(|group| group.get(key)),
                Some(value) => value.child(key),
            }
            .cloned();

            let Some(next) = next else {
                return default.clone();
            };
            cursor = Some(self.resolve_alias(next, default));
        }

        cursor.unwrap_or_else(|| default.clone())
    }

    fn resolve_alias(&mut self, value: Value, default: &Value) -> Value {
        let Value::String(text) = &value else {
            return value;
        };
        let Some(target) = text.strip_prefix(ALIAS_SENTINEL) else {
            return value;
        };
        if target.starts_with(ALIAS_SENTINEL) {
            return Value::String(target.to_string());
        }

        if self.alias_depth >= MAX_ALIAS_DEPTH {
            tracing::warn!(alias = %text, "Alias chain too deep, using default value");
            return default.clone();
        }

        self.alias_depth += 1;
        let resolved = match target.split_once(PATH_SEPARATOR) {
            Some((group, rest)) => match self.load(group, true, false) {
                Ok(_) => {
                    tracing::debug!(alias = %text, group, "Resolving aliased key");
                    self.get(rest, default.clone(), Some(group))
                }
                Err(e) => {
                    tracing::warn!(alias = %text, error = %e, "Could not load aliased group");
                    default.clone()
                }
            },
            None => match self.load(target, true, false) {
                Ok(items) => {
                    tracing::debug!(alias = %text, group = target, "Resolved group alias");
                    Value::Group(items)
                }
                Err(e) => {
                    tracing::warn!(alias = %text, error = %e, "Could not load aliased group");
                    default.clone()
                }
            },
        };
        self.alias_depth -= 1;

        resolved
    }
}
