//! The configuration container.
//!
//! Responsibilities:
//! - Load groups through a `Provider`, merging environment overlays on top of defaults.
//! - Store merged entries in named sub-indexes (`"default"` or one per group).
//! - Answer keyed lookups with compound keys, colon paths, aliases and producers.
//!
//! Does NOT handle:
//! - Reading or parsing backing storage (see `provider`).
//! - Thread synchronization; wrap the container in a `Mutex` to share it.
//!
//! Invariants:
//! - Default data is loaded first; environment data wins on scalar collisions and is
//!   merged recursively into collections.
//! - An explicit, non-empty index argument overrides the index named in a compound key.
//! - Lookup misses return the caller's default; only provider failures are errors.
//! - Producers are invoked on every read; memoisation belongs to the producer.

mod access;
mod error;
mod key;
mod walk;

pub use error::ContainerError;

use std::collections::BTreeMap;

use crate::constants::{DEFAULT_GROUP, DEFAULT_INDEX};
use crate::merge::merge;
use crate::provider::{ArrayProvider, Provider};
use crate::value::{Group, Value};

/// Hierarchical configuration container.
#[derive(Debug)]
pub struct Container {
    environment: Option<String>,
    provider: Box<dyn Provider>,
    items: BTreeMap<String, Group>,
    alias_depth: usize,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(ArrayProvider::new())
    }
}

impl Container {
    /// Create an empty container loading groups from `provider`.
    pub fn new(provider: impl Provider + 'static) -> Self {
        Self::from_boxed(Box::new(provider))
    }

    pub(crate) fn from_boxed(provider: Box<dyn Provider>) -> Self {
        Self {
            environment: None,
            provider,
            items: BTreeMap::new(),
            alias_depth: 0,
        }
    }

    /// Set the environment whose overlays are merged on top of the defaults.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.set_environment(environment);
        self
    }

    /// Set the environment. An empty name leaves the current environment unchanged.
    pub fn set_environment(&mut self, environment: impl Into<String>) {
        let environment = environment.into();
        if !environment.is_empty() {
            self.environment = Some(environment);
        }
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Replace the provider. Already loaded groups are kept.
    pub fn set_provider(&mut self, provider: impl Provider + 'static) {
        self.provider = Box::new(provider);
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Load a single group and return the entries loaded by this call.
    ///
    /// An empty `group` loads `"default"`. With `index` the entries are stored under a
    /// sub-index named after the group, otherwise under the shared `"default"` sub-index
    /// where same-named keys from different groups overwrite each other.
    ///
    /// With `reload = false`, a group whose name is already a sub-index is returned from
    /// memory without querying the provider.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::Provider` if the provider rejects the request.
    pub fn load(&mut self, group: &str, index: bool, reload: bool) -> Result<Group, ContainerError> {
        let group = if group.is_empty() { DEFAULT_GROUP } else { group };
        let index_group = if index { group } else { DEFAULT_INDEX };

        if !reload && let Some(loaded) = self.items.get(group) {
            tracing::debug!(group, "Config group already loaded, skipping provider");
            return Ok(loaded.clone());
        }

        let defaults = self.provider.load(group, None)?;
        let items = match self.environment.as_deref() {
            Some(environment) => {
                let overlay = self.provider.load(group, Some(environment))?;
                merge(&defaults, &overlay)
            }
            None => defaults,
        };

        for (key, value) in &items {
            self.set(key, value.clone(), Some(index_group));
        }

        tracing::debug!(
            group,
            index = index_group,
            environment = ?self.environment,
            keys = items.len(),
            "Loaded config group"
        );

        Ok(items)
    }

    /// Load several groups with the same `index` flag, always reloading.
    ///
    /// Loaded entries are not returned; query them with `get` or `all`.
    ///
    /// # Errors
    ///
    /// Stops at the first group the provider rejects.
    pub fn load_many<I, S>(&mut self, groups: I, index: bool) -> Result<(), ContainerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for group in groups {
            self.load(group.as_ref(), index, true)?;
        }
        Ok(())
    }

    /// Store `value` under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<Value>, index: Option<&str>) {
        let (index_name, key) = key::normalize(key, index);
        self.items
            .entry(index_name.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Alias for [`Container::set`].
    pub fn add(&mut self, key: &str, value: impl Into<Value>, index: Option<&str>) {
        self.set(key, value, index);
    }

    /// Whether `key` is stored directly in its sub-index (colon paths are not walked).
    pub fn has(&self, key: &str, index: Option<&str>) -> bool {
        let (index_name, key) = key::normalize(key, index);
        self.items
            .get(index_name)
            .is_some_and(|group| group.contains_key(key))
    }

    /// Remove `key` from its sub-index if present.
    pub fn forget(&mut self, key: &str, index: Option<&str>) {
        let (index_name, key) = key::normalize(key, index);
        if let Some(group) = self.items.get_mut(index_name) {
            group.remove(key);
        }
    }

    /// Look up `key`, walking `:` separated paths and following aliases.
    ///
    /// The found value, or `default` on a miss, is passed through [`Container::evaluate`].
    pub fn get(&mut self, key: &str, default: impl Into<Value>, index: Option<&str>) -> Value {
        let default = default.into();
        let (index_name, key) = key::normalize(key, index);

        let value = if self.items.contains_key(index_name) {
            self.walk(index_name, key, &default)
        } else {
            default
        };

        self.evaluate(value)
    }

    /// Invoke producers with this container; return any other value unchanged.
    pub fn evaluate(&mut self, value: Value) -> Value {
        match value {
            Value::Producer(producer) => producer.invoke(self),
            other => other,
        }
    }

    /// Everything stored, or a single sub-index.
    ///
    /// Without an index name the result maps every sub-index name to its group. An unknown
    /// sub-index yields an empty group.
    pub fn all(&self, index: Option<&str>) -> Group {
        match index.filter(|i| !i.is_empty()) {
            None => self
                .items
                .iter()
                .map(|(name, group)| (name.clone(), Value::Group(group.clone())))
                .collect(),
            Some(name) => self.items.get(name).cloned().unwrap_or_default(),
        }
    }

    /// Drop every loaded group.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::value::{Producer, group};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn nested(entries: Vec<(&str, Value)>) -> Value {
        Value::Group(group(entries))
    }

    fn provider() -> ArrayProvider {
        ArrayProvider::new()
            .with_group(
                "default",
                group([
                    ("name", Value::from("default")),
                    (
                        "recursive_test",
                        nested(vec![
                            ("foo", Value::from("old")),
                            ("only_in_parent", Value::from("baz")),
                            (
                                "bar",
                                nested(vec![
                                    ("baz", Value::from("old")),
                                    ("qux", Value::from("original")),
                                ]),
                            ),
                        ]),
                    ),
                ]),
            )
            .with_environment_group(
                "test",
                "default",
                group([
                    ("name", Value::from("test")),
                    (
                        "recursive_test",
                        nested(vec![
                            ("foo", Value::from("new_value")),
                            ("only_in_env", Value::from("qux")),
                            (
                                "bar",
                                nested(vec![
                                    ("baz", Value::from("new_value")),
                                    ("bee", Value::from("sting")),
                                ]),
                            ),
                        ]),
                    ),
                ]),
            )
            .with_group("extra", group([("foo", Value::from("Foo"))]))
    }

    /// Provider that counts how often it is queried.
    #[derive(Debug)]
    struct CountingProvider {
        inner: ArrayProvider,
        calls: Arc<AtomicUsize>,
    }

    impl Provider for CountingProvider {
        fn load(&self, group: &str, environment: Option<&str>) -> Result<Group, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.load(group, environment)
        }
    }

    #[test]
    fn test_default_container_uses_empty_array_provider() {
        let mut config = Container::default();
        assert!(config.load("default", false, true).unwrap().is_empty());
        assert!(config.environment().is_none());
    }

    #[test]
    fn test_load_default() {
        let mut config = Container::new(provider());
        config.load("default", false, true).unwrap();
        assert_eq!(config.get("name", Value::Null, None), Value::from("default"));
    }

    #[test]
    fn test_empty_group_name_loads_default() {
        let mut config = Container::new(provider());
        config.load("", false, true).unwrap();
        assert_eq!(config.get("name", Value::Null, None), Value::from("default"));
    }

    #[test]
    fn test_environment_overlay_merges_recursively() {
        let mut config = Container::new(provider()).with_environment("test");
        config.load("default", false, true).unwrap();

        assert_eq!(config.get("name", Value::Null, None), Value::from("test"));
        assert_eq!(
            config.get("recursive_test:foo", Value::Null, None),
            Value::from("new_value")
        );
        assert_eq!(
            config.get("recursive_test:only_in_parent", Value::Null, None),
            Value::from("baz")
        );
        assert_eq!(
            config.get("recursive_test:only_in_env", Value::Null, None),
            Value::from("qux")
        );
        assert_eq!(
            config.get("recursive_test:bar:baz", Value::Null, None),
            Value::from("new_value")
        );
        assert_eq!(
            config.get("recursive_test:bar:qux", Value::Null, None),
            Value::from("original")
        );
        assert_eq!(
            config.get("recursive_test:bar:bee", Value::Null, None),
            Value::from("sting")
        );
    }

    #[test]
    fn test_load_returns_only_this_call() {
        let mut config = Container::new(provider());
        config.load("extra", false, true).unwrap();

        let loaded = config.load("default", false, true).unwrap();

        assert!(loaded.contains_key("name"));
        assert!(!loaded.contains_key("foo"));
        assert!(config.has("foo", None));
    }

    #[test]
    fn test_set_environment_ignores_empty() {
        let mut config = Container::new(provider()).with_environment("test");
        config.set_environment("");
        assert_eq!(config.environment(), Some("test"));
    }

    #[test]
    fn test_no_environment_queries_provider_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut config = Container::new(CountingProvider {
            inner: provider(),
            calls: Arc::clone(&calls),
        });

        config.load("default", false, true).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        config.set_environment("test");
        config.load("default", false, true).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_reload_false_short_circuits_on_group_name() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut config = Container::new(CountingProvider {
            inner: provider(),
            calls: Arc::clone(&calls),
        });

        config.load("extra", true, true).unwrap();
        config.set("foo", "changed", Some("extra"));

        let cached = config.load("extra", true, false).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached["foo"], Value::from("changed"));
    }

    #[test]
    fn test_reload_false_checks_raw_group_name_not_target_index() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut config = Container::new(CountingProvider {
            inner: provider(),
            calls: Arc::clone(&calls),
        });

        // Non-indexed load writes to "default", so "extra" is not a sub-index yet.
        config.load("extra", false, true).unwrap();
        config.load("extra", false, false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The "default" group name matches the shared sub-index and short-circuits.
        let cached = config.load("default", false, false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached["foo"], Value::from("Foo"));
    }

    #[test]
    fn test_provider_error_propagates_from_load() {
        #[derive(Debug)]
        struct RejectingProvider;

        impl Provider for RejectingProvider {
            fn load(&self, _: &str, _: Option<&str>) -> Result<Group, ProviderError> {
                Err(ProviderError::MissingGroupName)
            }
        }

        let mut config = Container::new(RejectingProvider);
        let result = config.load("default", false, true);

        assert!(matches!(
            result,
            Err(ContainerError::Provider(ProviderError::MissingGroupName))
        ));
    }

    #[test]
    fn test_load_many_with_index() {
        let mut config = Container::new(provider());
        config.load_many(["default", "extra"], true).unwrap();

        assert_eq!(config.get("name", Value::Null, None), Value::from("default"));
        assert_eq!(config.get("foo", Value::Null, Some("extra")), Value::from("Foo"));
        assert!(!config.has("foo", None));
    }

    #[test]
    fn test_load_many_without_index_shares_namespace() {
        let mut config = Container::new(provider());
        config.load_many(["default", "extra"], false).unwrap();

        assert_eq!(config.get("name", Value::Null, None), Value::from("default"));
        assert_eq!(config.get("foo", Value::Null, None), Value::from("Foo"));
    }

    #[test]
    fn test_missing_key_returns_default() {
        let mut config = Container::new(provider());
        config.load("default", false, true).unwrap();

        assert_eq!(config.get("doesnotexist", "foo", None), Value::from("foo"));
        assert_eq!(
            config.get("foo", "Foo", Some("doesnotexist")),
            Value::from("Foo")
        );
    }

    #[test]
    fn test_has_and_forget() {
        let mut config = Container::default();
        config.set("bar", "Bar", None);

        assert!(config.has("bar", None));
        assert!(config.has("default.bar", None));
        assert!(config.has("bar", Some("default")));
        assert!(!config.has("foo", None));
        assert!(!config.has("default.foo", None));

        config.forget("default.bar", None);
        assert!(!config.has("bar", None));

        // Forgetting an unknown key or index is a no-op.
        config.forget("nothing", Some("nowhere"));
    }

    #[test]
    fn test_add_is_set() {
        let mut config = Container::default();
        config.add("foo", "Foo", Some("test"));
        assert_eq!(config.get("test.foo", Value::Null, None), Value::from("Foo"));
    }

    #[test]
    fn test_all_and_clear() {
        let mut config = Container::new(provider());
        config.load("default", false, true).unwrap();

        let everything = config.all(None);
        assert!(everything.contains_key("default"));
        assert!(config.all(Some("default")).contains_key("name"));
        assert!(config.all(Some("indexdoesnotexist")).is_empty());

        config.clear();
        assert!(config.all(None).is_empty());
    }

    #[test]
    fn test_transient_producer_runs_every_read() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut config = Container::default();
        config.set(
            "bar2",
            Producer::from_fn(move || Value::from(counter.fetch_add(1, Ordering::SeqCst) as u64)),
            None,
        );

        let first = config.get("bar2", Value::Null, None);
        let second = config.get("bar2", Value::Null, None);

        assert_ne!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_singleton_producer_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut config = Container::default();
        config.set(
            "bar",
            Producer::singleton(move |_| {
                Value::from(counter.fetch_add(1, Ordering::SeqCst) as u64)
            }),
            None,
        );

        let first = config.get("bar", Value::Null, None);
        let second = config.get("bar", Value::Null, None);

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_producer_receives_container() {
        let mut config = Container::default();
        config.set("host", "localhost", None);
        config.set(
            "url",
            Producer::new(|c| {
                let host = c.get("host", Value::Null, None);
                Value::from(format!("http://{}", host.as_str().unwrap_or_default()))
            }),
            None,
        );

        assert_eq!(config.get("url", Value::Null, None), Value::from("http://localhost"));
    }

    #[test]
    fn test_producer_default_is_evaluated() {
        let mut config = Container::default();
        let value = config.get(
            "doesnotexist",
            Producer::from_fn(|| Value::from("default")),
            None,
        );
        assert_eq!(value, Value::from("default"));
    }

    #[test]
    fn test_set_provider_keeps_loaded_groups() {
        let mut config = Container::new(provider());
        config.load("default", false, true).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        config.set_provider(CountingProvider {
            inner: ArrayProvider::new()
                .with_group("swapped", group([("source", Value::from("replacement"))])),
            calls: Arc::clone(&calls),
        });

        assert_eq!(config.get("name", Value::Null, None), Value::from("default"));

        config.load("swapped", true, true).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            config.get("swapped.source", Value::Null, None),
            Value::from("replacement")
        );

        let groups = config.provider().load("swapped", None).unwrap();
        assert_eq!(groups["source"], Value::from("replacement"));
        assert!(config.provider().load("extra", None).unwrap().is_empty());
    }

    #[test]
    fn test_container_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Container>();
    }
}
