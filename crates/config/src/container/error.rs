//! Error types for container operations.
//!
//! Lookups never fail: misses return the caller's default. Only loading (through the
//! provider) and the dynamic group accessor can return an error.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that can occur while loading or accessing configuration groups.
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Invalid argument count: expected at most 2, got {count}")]
    InvalidArgumentCount { count: usize },
}
