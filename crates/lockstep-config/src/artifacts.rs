//! Locations of the four artifacts a check reads.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_schema() -> PathBuf {
    PathBuf::from("include/config.h")
}

fn default_persistence() -> PathBuf {
    PathBuf::from("src/config.cpp")
}

fn default_runtime() -> PathBuf {
    PathBuf::from("src/console.cpp")
}

fn default_docs() -> PathBuf {
    PathBuf::from("README.md")
}

/// Artifact paths, relative to the project root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArtifactPaths {
    /// Header holding the canonical struct declaration.
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    /// Code that loads fields from and dumps them to the serialized document.
    #[serde(default = "default_persistence")]
    pub persistence: PathBuf,

    /// Code implementing get/set by option name.
    #[serde(default = "default_runtime")]
    pub runtime: PathBuf,

    /// Markdown reference table.
    #[serde(default = "default_docs")]
    pub docs: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            persistence: default_persistence(),
            runtime: default_runtime(),
            docs: default_docs(),
        }
    }
}

impl ArtifactPaths {
    /// Resolve every path against `root`, leaving absolute paths untouched.
    #[must_use]
    pub fn resolved(&self, root: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        Self {
            schema: resolve(&self.schema),
            persistence: resolve(&self.persistence),
            runtime: resolve(&self.runtime),
            docs: resolve(&self.docs),
        }
    }
}
