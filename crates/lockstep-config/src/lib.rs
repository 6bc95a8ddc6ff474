//! # lockstep-config
//!
//! Layered configuration loading for lockstep using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LOCKSTEP_*` prefix, `__` as separator)
//! 2. Project-level `lockstep.toml` (or an explicit `--config` file)
//! 3. User-level `~/.config/lockstep/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LOCKSTEP_ARTIFACTS__DOCS` -> `artifacts.docs`,
//! `LOCKSTEP_PATTERNS__INSTANCE` -> `patterns.instance`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use lockstep_config::LockstepConfig;
//!
//! let config = LockstepConfig::load(Path::new("."), None).expect("config");
//! println!("schema header: {}", config.artifacts.schema.display());
//! ```

mod artifacts;
mod docs;
mod error;
mod patterns;

pub use artifacts::ArtifactPaths;
pub use docs::DocsConfig;
pub use error::ConfigError;
pub use patterns::PatternConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local config file.
pub const PROJECT_CONFIG_FILE: &str = "lockstep.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LockstepConfig {
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub docs: DocsConfig,
}

impl LockstepConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// `explicit` replaces the project-local `lockstep.toml` lookup.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        let config: Self = Self::figment(project_root, explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    pub fn figment(project_root: &Path, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config, or the explicitly requested file
        match explicit {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                let local_path = project_root.join(PROJECT_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LOCKSTEP_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.patterns.validate()?;
        if self.docs.string_label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "docs.string_label".to_string(),
                reason: "label must not be empty".to_string(),
            });
        }
        if self.docs.bool_label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "docs.bool_label".to_string(),
                reason: "label must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lockstep").join("config.toml"))
    }
}
