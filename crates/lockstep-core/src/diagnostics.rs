//! Diagnostics: the sink every phase writes to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::DiagnosticKind;
use crate::facts::SourceLocation;

/// One reported inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub artifact: String,
    /// 1-based line, or `None` when the problem has no specific location.
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// Sentinel printed for diagnostics without a line.
    pub const UNKNOWN_LINE: i64 = -1;

    #[must_use]
    pub fn at(location: &SourceLocation, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            artifact: location.artifact.clone(),
            line: Some(location.line),
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unlocated(
        artifact: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            line: None,
            kind,
            message: message.into(),
        }
    }

    /// Line number for display, `-1` when unknown.
    #[must_use]
    pub fn display_line(&self) -> i64 {
        self.line
            .and_then(|line| i64::try_from(line).ok())
            .unwrap_or(Self::UNKNOWN_LINE)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.artifact, self.display_line(), self.message)
    }
}

/// Append-only, ordered collection of diagnostics.
///
/// No deduplication: a field missing from several categories is reported
/// once per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of diagnostics of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
