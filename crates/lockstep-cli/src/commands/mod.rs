pub mod check;
pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::Context;
use lockstep_config::LockstepConfig;

use crate::cli::GlobalFlags;

/// How a command finished, mapped to the process exit status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

/// Resolve `--project`, defaulting to the current directory.
pub fn resolve_project_root(project_override: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        if path.is_dir() {
            return Ok(path.to_path_buf());
        }
        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            path.display()
        );
    }
    std::env::current_dir().context("failed to read current directory")
}

/// Load layered configuration for the resolved project.
pub fn load_config(root: &Path, flags: &GlobalFlags) -> anyhow::Result<LockstepConfig> {
    LockstepConfig::load(root, flags.config.as_deref()).context("failed to load configuration")
}
