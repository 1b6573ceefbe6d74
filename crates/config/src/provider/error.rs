//! Error types for group providers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a `Provider`.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No config group specified")]
    MissingGroupName,

    #[error("Specified config path doesn't exist: {}", .path.display())]
    InvalidPath { path: PathBuf },
}
