//! Hierarchical configuration container.
//!
//! Groups of settings are read from a pluggable [`Provider`], environment overlays are
//! deep-merged on top of the defaults, and values are looked up with compound keys
//! (`"index.key"`), colon paths (`"database:primary:host"`), aliases to other groups
//! (`"#group:key"`) and deferred [`Producer`] values.
//!
//! ```
//! use cascade_config::{ArrayProvider, Container, Value, group};
//!
//! let provider = ArrayProvider::new()
//!     .with_group("default", group([("name", Value::from("default"))]))
//!     .with_environment_group("test", "default", group([("name", Value::from("test"))]));
//!
//! let mut config = Container::new(provider).with_environment("test");
//! config.load("default", false, true).unwrap();
//! assert_eq!(config.get("name", Value::Null, None), Value::from("test"));
//! ```

pub mod constants;
mod container;
mod loader;
mod merge;
pub mod provider;
mod value;

pub use container::{Container, ContainerError};
pub use loader::{ConfigError, ConfigFormat, ContainerBuilder, env_var_or_none};
pub use merge::merge;
pub use provider::{ArrayProvider, JsonProvider, Provider, ProviderError, YamlProvider};
pub use value::{Group, Producer, Value, group};
