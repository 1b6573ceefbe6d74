//! Directory layout shared by the file-backed providers.
//!
//! Responsibilities:
//! - Validate the configured root directory.
//! - Map `(group, environment)` to a file path under the root.
//! - Read a file and hand its text to a format-specific parser.
//!
//! Does NOT handle:
//! - Parsing file contents (see `json.rs` and `yaml.rs`).
//!
//! Invariants:
//! - Defaults live at `<root>/<group>.<ext>`, overlays at `<root>/<environment>/<group>.<ext>`.
//! - Only the base name of `group` is used, with a trailing `.<ext>` stripped.
//! - Missing, unreadable, or non-mapping files load as an empty group; only a missing
//!   group name is an error.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::ProviderError;
use crate::value::{Group, Value};

#[derive(Debug, Clone)]
pub(crate) struct FileLayout {
    root: PathBuf,
    extension: &'static str,
}

impl FileLayout {
    /// Create a layout rooted at `root`.
    ///
    /// Trailing separators are dropped from the stored root.
    pub(crate) fn new(root: &Path, extension: &'static str) -> Result<Self, ProviderError> {
        let root: PathBuf = root.components().collect();

        if !root.exists() {
            return Err(ProviderError::InvalidPath { path: root });
        }

        Ok(Self { root, extension })
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn resolve(&self, group: &str, environment: Option<&str>) -> PathBuf {
        let base = Path::new(group)
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        let suffix = format!(".{}", self.extension);
        let stem = base.strip_suffix(suffix.as_str()).unwrap_or(base);
        let file_name = format!("{stem}{suffix}");

        match environment.filter(|env| !env.is_empty()) {
            Some(env) => self.root.join(env).join(file_name),
            None => self.root.join(file_name),
        }
    }

    /// Read `group` and parse it with `parse`.
    ///
    /// `parse` returns `None` when the text is not valid in the format.
    pub(crate) fn load_with<F>(
        &self,
        group: &str,
        environment: Option<&str>,
        parse: F,
    ) -> Result<Group, ProviderError>
    where
        F: FnOnce(&str) -> Option<serde_json::Value>,
    {
        if group.is_empty() {
            return Err(ProviderError::MissingGroupName);
        }

        let path = self.resolve(group, environment);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "Config file not found, using empty group");
            return Ok(Group::new());
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read config file, using empty group"
                );
                return Ok(Group::new());
            }
        };

        match parse(&content).map(Value::from) {
            Some(Value::Group(items)) => Ok(items),
            Some(_) => {
                tracing::debug!(path = %path.display(), "Config file is not a mapping, using empty group");
                Ok(Group::new())
            }
            None => {
                tracing::warn!(path = %path.display(), "Could not parse config file, using empty group");
                Ok(Group::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_invalid_path() {
        let result = FileLayout::new(Path::new("/path/to/nowhere"), "json");
        assert!(matches!(result, Err(ProviderError::InvalidPath { .. })));
    }

    #[test]
    fn test_trailing_separator_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let with_slash = format!("{}/", dir.path().display());

        let layout = FileLayout::new(Path::new(&with_slash), "json").unwrap();

        assert_eq!(layout.root(), dir.path());
    }

    #[test]
    fn test_resolve_paths() {
        let dir = TempDir::new().unwrap();
        let layout = FileLayout::new(dir.path(), "json").unwrap();

        assert_eq!(layout.resolve("default", None), dir.path().join("default.json"));
        assert_eq!(layout.resolve("default.json", None), dir.path().join("default.json"));
        assert_eq!(
            layout.resolve("../../etc/default", None),
            dir.path().join("default.json")
        );
        assert_eq!(
            layout.resolve("default", Some("test")),
            dir.path().join("test").join("default.json")
        );
        assert_eq!(layout.resolve("default", Some("")), dir.path().join("default.json"));
    }

    #[test]
    fn test_non_mapping_document_loads_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("list.json"), "[1, 2, 3]").unwrap();
        let layout = FileLayout::new(dir.path(), "json").unwrap();

        let items = layout
            .load_with("list", None, |text| serde_json::from_str(text).ok())
            .unwrap();

        assert!(items.is_empty());
    }
}
