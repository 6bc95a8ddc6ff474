//! Usage facts: one recognized occurrence of a field in a dependent artifact.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{AccessorShape, UsageCategory};

/// Artifact path plus 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub artifact: String,
    pub line: usize,
}

impl SourceLocation {
    #[must_use]
    pub fn new(artifact: impl Into<String>, line: usize) -> Self {
        Self {
            artifact: artifact.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.artifact, self.line)
    }
}

/// Category-specific details captured alongside a fact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactExtra {
    /// Default-value text after `|`, verbatim (persistence reads).
    pub default_text: Option<String>,
    /// Field named inside `sizeof(...)` (bounded copies).
    pub size_of_target: Option<String>,
    /// Function wrapping the assigned value (runtime sets), e.g. `atoi`.
    pub parser: Option<String>,
    /// Literal type cell (doc entries).
    pub doc_type: Option<String>,
    /// Literal default cell (doc entries).
    pub doc_default: Option<String>,
}

/// A single recognized usage of a schema field.
///
/// Facts are created by the scanners, validated once, and then only kept
/// for the completeness pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageFact {
    pub category: UsageCategory,
    pub accessor: AccessorShape,
    pub observed_key: String,
    pub referenced_key: String,
    pub location: SourceLocation,
    pub extra: FactExtra,
}

impl UsageFact {
    #[must_use]
    pub fn new(
        category: UsageCategory,
        accessor: AccessorShape,
        observed_key: impl Into<String>,
        referenced_key: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            category,
            accessor,
            observed_key: observed_key.into(),
            referenced_key: referenced_key.into(),
            location,
            extra: FactExtra::default(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, extra: FactExtra) -> Self {
        self.extra = extra;
        self
    }

    /// The code-side identifier this fact is about.
    ///
    /// Writes observe the external key and reference the field; every other
    /// category observes the field (or, for checks and doc rows, a key that is
    /// also the field name).
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self.category {
            UsageCategory::PersistenceWrite => &self.referenced_key,
            _ => &self.observed_key,
        }
    }

    /// The external key the artifact spells out for this field.
    #[must_use]
    pub fn external_key(&self) -> &str {
        match self.category {
            UsageCategory::PersistenceWrite => &self.observed_key,
            _ => &self.referenced_key,
        }
    }
}
