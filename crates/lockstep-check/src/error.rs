use std::path::PathBuf;

use lockstep_config::ConfigError;
use lockstep_scan::ScanError;
use thiserror::Error;

/// Conditions that stop a check before any diagnostics can be produced.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot read artifact '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}
