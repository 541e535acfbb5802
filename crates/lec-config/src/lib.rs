//! # lec-config
//!
//! Layered configuration loading for Lectern using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LECTERN_*` prefix, `__` as separator)
//! 2. Project-level `.lectern/config.toml`
//! 3. User-level `~/.config/lectern/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LECTERN_AI__API_KEY` -> `ai.api_key`, `LECTERN_RELAY__BIND_ADDR`
//! -> `relay.bind_addr`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lec_config::LecternConfig;
//!
//! let config = LecternConfig::load_with_dotenv().expect("config");
//!
//! if config.ai.is_configured() {
//!     println!("Remote model: {}", config.ai.model);
//! }
//! ```

mod ai;
mod error;
mod general;
mod relay;

pub use ai::{AiConfig, AiTransport};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use relay::RelayConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LecternConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LecternConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and check a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lectern/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LECTERN_").split("__"))
    }

    /// Reject values that would make the HTTP layers misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero timeouts or a relay
    /// path that does not start with `/`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ai.timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.relay.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "relay.timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if !self.relay.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "relay.path".into(),
                reason: format!("'{}' must start with '/'", self.relay.path),
            });
        }
        Ok(())
    }

    /// Return the relay section, or an error if it cannot forward upstream.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `relay.api_key` is empty.
    pub fn require_relay(&self) -> Result<&RelayConfig, ConfigError> {
        if self.relay.is_configured() {
            Ok(&self.relay)
        } else {
            Err(ConfigError::NotConfigured {
                section: "relay".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lectern").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
