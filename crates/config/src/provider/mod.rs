//! Group providers.
//!
//! Responsibilities:
//! - Define the `Provider` trait the container loads groups through.
//! - Provide in-memory (`ArrayProvider`) and file-backed (`JsonProvider`, `YamlProvider`) implementations.
//!
//! Does NOT handle:
//! - Merging default and environment data (see `merge.rs` and `Container::load`).
//! - Alias resolution or producer evaluation (see `container`).
//!
//! Invariants:
//! - An empty group name is always rejected with `ProviderError::MissingGroupName`.
//! - A group that does not exist, or cannot be read as a mapping, loads as an empty group.
//! - `environment = None` selects default data; `Some(env)` selects only the overlay for `env`.

mod array;
mod error;
mod file;
mod json;
mod yaml;

pub use array::ArrayProvider;
pub use error::ProviderError;
pub use json::JsonProvider;
pub use yaml::YamlProvider;

use std::fmt::Debug;

use crate::value::Group;

/// Source of raw configuration groups.
pub trait Provider: Debug + Send + Sync {
    /// Load `group`, or its overlay for `environment` when one is given.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::MissingGroupName` when `group` is empty.
    fn load(&self, group: &str, environment: Option<&str>) -> Result<Group, ProviderError>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn load(&self, group: &str, environment: Option<&str>) -> Result<Group, ProviderError> {
        (**self).load(group, environment)
    }
}
