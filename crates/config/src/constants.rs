//! Centralized constants for the configuration container.

// =============================================================================
// Addressing
// =============================================================================

/// Group loaded when no group name is given.
pub const DEFAULT_GROUP: &str = "default";

/// Sub-index used for non-indexed loads and keys without an index part.
pub const DEFAULT_INDEX: &str = "default";

/// Separates the index name from the key in compound keys (`"db.host"`).
pub const INDEX_SEPARATOR: char = '.';

/// Separates nested keys in lookup paths (`"database:primary:host"`).
pub const PATH_SEPARATOR: char = ':';

/// Leading character marking a string value as an alias to another group.
///
/// Doubling it (`"##text"`) escapes the alias and yields the literal `"#text"`.
pub const ALIAS_SENTINEL: char = '#';

/// Maximum number of nested alias resolutions during a single lookup.
pub const MAX_ALIAS_DEPTH: usize = 32;

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment whose overlays are merged on top of the defaults.
pub const ENV_ENVIRONMENT: &str = "CASCADE_ENV";

/// Root directory of the file-backed provider.
pub const ENV_CONFIG_PATH: &str = "CASCADE_CONFIG_PATH";

/// File format of the file-backed provider (`json` or `yaml`).
pub const ENV_CONFIG_FORMAT: &str = "CASCADE_CONFIG_FORMAT";
