//! YAML file provider.

use std::path::{Path, PathBuf};

use super::file::FileLayout;
use super::{Provider, ProviderError};
use crate::value::Group;

/// Provider reading `<group>.yaml` files from a root directory.
///
/// Mappings with non-string keys cannot be represented as a group and load as empty.
#[derive(Debug, Clone)]
pub struct YamlProvider {
    layout: FileLayout,
}

impl YamlProvider {
    /// Create a provider rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidPath` if `path` does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        Ok(Self {
            layout: FileLayout::new(path.as_ref(), "yaml")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.layout.root()
    }

    pub fn resolve_file_path(&self, group: &str, environment: Option<&str>) -> PathBuf {
        self.layout.resolve(group, environment)
    }
}

impl Provider for YamlProvider {
    fn load(&self, group: &str, environment: Option<&str>) -> Result<Group, ProviderError> {
        self.layout
            .load_with(group, environment, |text| serde_yaml::from_str(text).ok())
    }
}
