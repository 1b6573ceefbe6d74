//! JSON file provider.

use std::path::{Path, PathBuf};

use super::file::FileLayout;
use super::{Provider, ProviderError};
use crate::value::Group;

/// Provider reading `<group>.json` files from a root directory.
#[derive(Debug, Clone)]
pub struct JsonProvider {
    layout: FileLayout,
}

impl JsonProvider {
    /// Create a provider rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidPath` if `path` does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        Ok(Self {
            layout: FileLayout::new(path.as_ref(), "json")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.layout.root()
    }

    /// The file `load` reads for `group` and `environment`.
    pub fn resolve_file_path(&self, group: &str, environment: Option<&str>) -> PathBuf {
        self.layout.resolve(group, environment)
    }
}

impl Provider for JsonProvider {
    fn load(&self, group: &str, environment: Option<&str>) -> Result<Group, ProviderError> {
        self.layout
            .load_with(group, environment, |text| serde_json::from_str(text).ok())
    }
}
