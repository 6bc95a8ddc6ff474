//! The four artifacts a check reads, loaded into memory up front.

use std::fs;
use std::path::Path;

use lockstep_config::ArtifactPaths;
use lockstep_core::UsageCategory;

use crate::error::CheckError;

/// Artifact text plus the label diagnostics use for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Path as configured, relative to the project root.
    pub label: String,
    pub text: String,
}

impl SourceText {
    #[must_use]
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub schema: SourceText,
    pub persistence: SourceText,
    pub runtime: SourceText,
    pub docs: SourceText,
}

impl ArtifactSet {
    /// Read every artifact under `root`.
    ///
    /// Any unreadable file stops the run; nothing can be cross-checked
    /// without all four.
    pub fn load(root: &Path, paths: &ArtifactPaths) -> Result<Self, CheckError> {
        let resolved = paths.resolved(root);
        Ok(Self {
            schema: read(&paths.schema, &resolved.schema)?,
            persistence: read(&paths.persistence, &resolved.persistence)?,
            runtime: read(&paths.runtime, &resolved.runtime)?,
            docs: read(&paths.docs, &resolved.docs)?,
        })
    }

    /// Artifact a usage category is expected to appear in.
    #[must_use]
    pub fn label_for(&self, category: UsageCategory) -> &str {
        match category {
            UsageCategory::PersistenceRead | UsageCategory::PersistenceWrite => {
                &self.persistence.label
            }
            UsageCategory::RuntimeCheck | UsageCategory::RuntimeGet | UsageCategory::RuntimeSet => {
                &self.runtime.label
            }
            UsageCategory::DocEntry => &self.docs.label,
        }
    }
}

fn read(label: &Path, path: &Path) -> Result<SourceText, CheckError> {
    let text = fs::read_to_string(path).map_err(|source| CheckError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "artifact loaded");
    Ok(SourceText::new(label.display().to_string(), text))
}
