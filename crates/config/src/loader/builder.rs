//! Container builder implementation.
//!
//! Responsibilities:
//! - Collect provider, config path, format and environment from code and env vars.
//! - Build the final `Container`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Loading groups; the built container starts empty.

use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use super::format::ConfigFormat;
use crate::container::Container;
use crate::provider::{ArrayProvider, JsonProvider, Provider, YamlProvider};

/// Builder that assembles a `Container` from code and environment variables.
///
/// ```
/// use cascade_config::{ArrayProvider, ContainerBuilder};
///
/// let config = ContainerBuilder::new()
///     .with_provider(ArrayProvider::new())
///     .with_environment("test".to_string())
///     .build()
///     .unwrap();
/// assert_eq!(config.environment(), Some("test"));
/// ```
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    provider: Option<Box<dyn Provider>>,
    environment: Option<String>,
    config_path: Option<PathBuf>,
    format: Option<ConfigFormat>,
}

impl ContainerBuilder {
    /// Create a new container builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Use `provider` instead of a file-backed provider.
    pub fn with_provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Set the environment whose overlays are merged on top of the defaults.
    pub fn with_environment(mut self, environment: String) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Read groups from files under `path`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Set the format of the files under the config path (JSON by default).
    pub fn with_format(mut self, format: ConfigFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub(crate) fn set_environment(&mut self, environment: Option<String>) {
        self.environment = environment;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_format(&mut self, format: Option<ConfigFormat>) {
        self.format = format;
    }

    pub fn environment(&self) -> Option<&String> {
        self.environment.as_ref()
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub fn format(&self) -> Option<ConfigFormat> {
        self.format
    }

    /// Build the container.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Provider` if the config path does not exist.
    pub fn build(self) -> Result<Container, ConfigError> {
        let format = self.format.unwrap_or_default();

        let provider: Box<dyn Provider> = match (self.provider, &self.config_path) {
            (Some(provider), _) => provider,
            (None, Some(path)) => match format {
                ConfigFormat::Json => Box::new(JsonProvider::new(path)?),
                ConfigFormat::Yaml => Box::new(YamlProvider::new(path)?),
            },
            (None, None) => Box::new(ArrayProvider::new()),
        };

        let mut container = Container::from_boxed(provider);
        if let Some(environment) = self.environment {
            container.set_environment(environment);
        }

        tracing::debug!(
            config_path = ?self.config_path,
            %format,
            environment = ?container.environment(),
            "Built config container"
        );

        Ok(container)
    }
}
