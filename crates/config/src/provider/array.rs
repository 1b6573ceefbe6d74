//! In-memory group provider.
//!
//! Groups are built in code, so they may carry `Producer` values that file formats cannot
//! express.

use std::collections::BTreeMap;

use super::{Provider, ProviderError};
use crate::value::Group;

/// Provider backed by groups registered in memory.
///
/// A container built without an explicit provider uses an empty `ArrayProvider`.
#[derive(Debug, Clone, Default)]
pub struct ArrayProvider {
    defaults: BTreeMap<String, Group>,
    environments: BTreeMap<String, BTreeMap<String, Group>>,
}

impl ArrayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the default data for `name`.
    pub fn with_group(mut self, name: impl Into<String>, group: Group) -> Self {
        self.insert_group(name, group);
        self
    }

    /// Register the overlay for `name` under `environment`.
    pub fn with_environment_group(
        mut self,
        environment: impl Into<String>,
        name: impl Into<String>,
        group: Group,
    ) -> Self {
        self.insert_environment_group(environment, name, group);
        self
    }

    pub fn insert_group(&mut self, name: impl Into<String>, group: Group) {
        self.defaults.insert(name.into(), group);
    }

    pub fn insert_environment_group(
        &mut self,
        environment: impl Into<String>,
        name: impl Into<String>,
        group: Group,
    ) {
        self.environments
            .entry(environment.into())
            .or_default()
            .insert(name.into(), group);
    }
}

impl Provider for ArrayProvider {
    fn load(&self, group: &str, environment: Option<&str>) -> Result<Group, ProviderError> {
        if group.is_empty() {
            return Err(ProviderError::MissingGroupName);
        }

        let found = match environment.filter(|env| !env.is_empty()) {
            Some(env) => self.environments.get(env).and_then(|groups| groups.get(group)),
            None => self.defaults.get(group),
        };

        Ok(found.cloned().unwrap_or_default())
    }
}
