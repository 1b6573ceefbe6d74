//! Configuration value model.
//!
//! Responsibilities:
//! - Define the tagged `Value` enum stored in groups (scalars, lists, nested groups, producers).
//! - Define `Producer`, the deferred value that is evaluated against the container on read.
//! - Convert parsed `serde_json::Value` documents into `Value` trees.
//!
//! Does NOT handle:
//! - Merging values (see `merge.rs`).
//! - Alias resolution (see `container/walk.rs`); aliases are plain strings here.
//!
//! Invariants:
//! - Two producers are equal only when they share the same underlying closure.
//! - Producers serialize as `null`; they have no data representation.
//! - A singleton producer runs its factory at most once per producer (clones share the cache).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Serialize, Serializer};

use crate::container::Container;

/// A named mapping of configuration keys to values.
pub type Group = BTreeMap<String, Value>;

/// A single configuration value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Ordered, list-style collection (numeric keys).
    List(Vec<Value>),
    /// Nested mapping, walkable with `:` separated paths.
    Group(Group),
    /// Deferred value, invoked with the container on every read.
    Producer(Producer),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for the two collection variants (`List` and `Group`).
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::List(_) | Value::Group(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Value::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_group(self) -> Option<Group> {
        match self {
            Value::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Look up a direct child of a collection.
    ///
    /// Lists are addressed by their decimal position. Scalars and producers have no children.
    pub fn child(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Group(g) => g.get(key),
            Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Render a scalar as the text used when it is passed where a key is expected.
    ///
    /// Collections and producers render as an empty string, which never matches a stored key
    /// written through `Container::set`.
    pub fn to_key(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::List(_) | Value::Group(_) | Value::Producer(_) => String::new(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x == y,
                _ => a.as_f64() == b.as_f64(),
            },
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Group(a), Value::Group(b)) => a == b,
            (Value::Producer(a), Value::Producer(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Producer(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Group(g) => g.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Group(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

/// Non-finite floats have no numeric representation and become `Null`.
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl From<Group> for Value {
    fn from(value: Group) -> Self {
        Value::Group(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Producer> for Value {
    fn from(value: Producer) -> Self {
        Value::Producer(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

type ProducerFn = dyn Fn(&mut Container) -> Value + Send + Sync;

/// A deferred configuration value.
///
/// The container invokes the producer every time it is read. Call-once semantics belong to
/// the producer itself: see [`Producer::singleton`].
#[derive(Clone)]
pub struct Producer(Arc<ProducerFn>);

impl Producer {
    /// Create a transient producer that receives the container on every invocation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Container) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Create a transient producer that does not need the container.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::new(move |_| f())
    }

    /// Create a producer that runs `factory` on first invocation and returns the cached
    /// result afterwards.
    ///
    /// The factory must not read its own key through the container: re-entering the
    /// initialization on the same thread deadlocks or panics.
    pub fn singleton<F>(factory: F) -> Self
    where
        F: Fn(&mut Container) -> Value + Send + Sync + 'static,
    {
        let cell: Arc<OnceLock<Value>> = Arc::new(OnceLock::new());
        Self::new(move |container| cell.get_or_init(|| factory(container)).clone())
    }

    pub(crate) fn invoke(&self, container: &mut Container) -> Value {
        (self.0)(container)
    }
}

impl PartialEq for Producer {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

/// Build a `Group` from `(key, value)` pairs.
///
/// ```
/// use cascade_config::{Value, group};
///
/// let g = group([("name", Value::from("default")), ("debug", Value::from(false))]);
/// assert_eq!(g.get("name"), Some(&Value::from("default")));
/// ```
pub fn group<K, I>(entries: I) -> Group
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
