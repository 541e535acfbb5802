//! Errors raised while loading or checking `LecternConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be read into the config.
    #[error("failed to load lectern config: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the running command lacks its credentials.
    #[error("section '{section}' lacks required settings (set them in config.toml or LECTERN_* variables)")]
    NotConfigured { section: String },

    /// A field is present but out of range.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
