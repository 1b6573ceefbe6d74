//! Compound-key accessors and the named-group accessor.
//!
//! The `item*` methods take a single compound key (`"<index>.<key>"`), the way map-style
//! access reads. `call` dispatches on the number of arguments, with `group` and `group_get`
//! as typed shorthands.

use super::{Container, ContainerError, key};
use crate::value::{Group, Value};

impl Container {
    /// Read the value at a compound key, defaulting to `Value::Null`.
    pub fn item(&mut self, key: &str) -> Value {
        let (index_name, key) = key::normalize(key, None);
        self.get(key, Value::Null, Some(index_name))
    }

    /// Store `value` at a compound key.
    pub fn set_item(&mut self, key: &str, value: impl Into<Value>) {
        let (index_name, key) = key::normalize(key, None);
        self.set(key, value, Some(index_name));
    }

    /// Remove the value at a compound key.
    pub fn unset_item(&mut self, key: &str) {
        self.forget(key, None);
    }

    /// Whether a value is stored at a compound key.
    pub fn item_exists(&self, key: &str) -> bool {
        self.has(key, None)
    }

    /// All entries of the sub-index `name`.
    pub fn group(&self, name: &str) -> Group {
        self.all(Some(name))
    }

    /// Look up `key` inside the sub-index `name`.
    pub fn group_get(&mut self, name: &str, key: &str, default: impl Into<Value>) -> Value {
        self.get(key, default, Some(name))
    }

    /// Access the sub-index `name` with zero, one or two arguments.
    ///
    /// - no arguments: every entry of the sub-index, as a `Value::Group`
    /// - `[key]`: the value at `key`, defaulting to `Value::Null`
    /// - `[key, default]`: the value at `key`, defaulting to `default`
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::InvalidArgumentCount` for more than two arguments.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, ContainerError> {
        let count = args.len();
        let mut args = args.into_iter();

        match (args.next(), args.next()) {
            _ if count > 2 => Err(ContainerError::InvalidArgumentCount { count }),
            (None, _) => Ok(Value::Group(self.group(name))),
            (Some(key), default) => {
                Ok(self.group_get(name, &key.to_key(), default.unwrap_or_default()))
            }
        }
    }
}
