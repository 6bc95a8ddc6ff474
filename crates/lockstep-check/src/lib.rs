//! # lockstep-check
//!
//! Cross-artifact validation: loads the artifacts, extracts the schema, feeds
//! every scan event through the [`CrossValidator`], runs the completeness
//! pass, and returns a [`CheckReport`].
//!
//! ```no_run
//! use std::path::Path;
//! use lockstep_config::LockstepConfig;
//!
//! let root = Path::new(".");
//! let config = LockstepConfig::load(root, None).expect("config");
//! let report = lockstep_check::check_project(root, &config).expect("readable artifacts");
//! println!("{}", report.render_text());
//! ```

use std::path::Path;

use lockstep_config::LockstepConfig;

pub mod artifacts;
pub mod completeness;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod validator;

pub use artifacts::{ArtifactSet, SourceText};
pub use completeness::check_completeness;
pub use error::CheckError;
pub use pipeline::check;
pub use report::CheckReport;
pub use validator::CrossValidator;

/// Load the configured artifacts under `root` and check them.
pub fn check_project(root: &Path, config: &LockstepConfig) -> Result<CheckReport, CheckError> {
    let artifacts = ArtifactSet::load(root, &config.artifacts)?;
    check(&artifacts, config)
}
