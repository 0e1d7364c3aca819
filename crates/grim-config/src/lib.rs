//! # grim-config
//!
//! Layered configuration loading for Grimoire using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GRIMOIRE_*` prefix, `__` as separator)
//! 2. Project-level `.grimoire/config.toml`
//! 3. User-level `~/.config/grimoire/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GRIMOIRE_RENDER__HEADING_LEVEL` -> `render.heading_level`,
//! `GRIMOIRE_SCHEMA__DIR` -> `schema.dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use grim_config::GrimConfig;
//!
//! let config = GrimConfig::load_with_dotenv().expect("config");
//! if let Some(dir) = config.schema.directory() {
//!     println!("schemas from {}", dir.display());
//! }
//! ```

mod error;
mod general;
mod render;
mod schema;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use render::{HEADING_LEVELS, RenderConfig};
pub use schema::SchemaConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "GRIMOIRE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GrimConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl GrimConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] on a malformed source, or
    /// [`ConfigError::InvalidValue`] when a loaded value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load with an extra TOML file layered above the project config and
    /// below the environment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let figment = Self::file_layers()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
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

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        Self::file_layers().merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        self.general.domain_override()?;
        Ok(())
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the user-global file, then the project file.
    fn file_layers() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".grimoire/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }
        figment
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("grimoire").join("config.toml"))
    }

    /// Load `.env` by walking up from `CARGO_MANIFEST_DIR`, falling back to
    /// the current directory. Silently does nothing if none is found.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GrimConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.schema.directory().is_none());
        assert!(config.schema.validate_on_ingest);
        assert_eq!(config.render.heading_level, 3);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: GrimConfig = GrimConfig::figment().extract()?;
            assert!(config.render.include_stat_block);
            assert!(config.general.default_domain.is_empty());
            Ok(())
        });
    }
}
