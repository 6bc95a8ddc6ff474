use std::fmt::Write as _;

use lockstep_core::{DiagnosticKind, Diagnostics, SchemaField, UsageFact};
use serde::Serialize;

/// Everything a check run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub schema_fields: Vec<SchemaField>,
    pub facts: Vec<UsageFact>,
    pub diagnostics: Diagnostics,
}

impl CheckReport {
    /// A run passes iff nothing was reported.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn count_kind(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.count_kind(kind)
    }

    /// Final summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed() {
            format!(
                "ok: {} fields consistent across all artifacts",
                self.schema_fields.len()
            )
        } else {
            format!("{} problem(s) found", self.diagnostics.len())
        }
    }

    /// One `artifact:line: message` line per diagnostic, then the summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            let _ = writeln!(out, "{diagnostic}");
        }
        out.push_str(&self.summary());
        out
    }

    /// The whole report as pretty JSON.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
