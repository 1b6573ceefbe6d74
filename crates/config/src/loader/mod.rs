//! Container construction from code, environment variables and `.env` files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ContainerBuilder` selecting provider and environment.
//! - Read `CASCADE_ENV`, `CASCADE_CONFIG_PATH` and `CASCADE_CONFIG_FORMAT`.
//! - Enforce the `DOTENV_DISABLED` gate before loading a `.env` file.
//!
//! Does NOT handle:
//! - Loading configuration groups (see `container`).
//! - Parsing group files (see `provider`).
//!
//! Invariants / Assumptions:
//! - Later builder calls override earlier ones, including values read by `from_env()`.
//! - An explicit provider wins over a configured path.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod format;

#[cfg(test)]
mod tests;

pub use builder::ContainerBuilder;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use format::ConfigFormat;
