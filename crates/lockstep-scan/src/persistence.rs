//! Persistence artifact scanner: load and dump of the struct through a keyed
//! document.

use lockstep_core::{AccessorShape, FactExtra, SourceLocation, UsageCategory, UsageFact};

use crate::recognizers::{CodePatterns, code_part, is_comment_line};
use crate::{ArtifactScanner, ScanEvent};

/// Emits `PersistenceRead` for direct reads and bounded copies out of the
/// document, and `PersistenceWrite` for assignments into it.
#[derive(Debug, Clone)]
pub struct PersistenceScanner {
    patterns: CodePatterns,
}

impl PersistenceScanner {
    #[must_use]
    pub const fn new(patterns: CodePatterns) -> Self {
        Self { patterns }
    }

    fn scan_line(&self, line: &str, location: SourceLocation) -> Option<UsageFact> {
        if let Some(copy) = self.patterns.bounded_copy.recognize(line) {
            // A copy from anything but the document is not a load.
            let source = self.patterns.keyed_source.recognize(&copy.source)?;
            let fact = UsageFact::new(
                UsageCategory::PersistenceRead,
                AccessorShape::BoundedCopy,
                copy.field,
                source.key,
                location,
            )
            .with_extra(FactExtra {
                default_text: source.default,
                size_of_target: Some(copy.size_of),
                ..FactExtra::default()
            });
            return Some(fact);
        }

        if let Some(read) = self.patterns.direct_read.recognize(line) {
            let fact = UsageFact::new(
                UsageCategory::PersistenceRead,
                AccessorShape::DirectAssignment,
                read.field,
                read.source.key,
                location,
            )
            .with_extra(FactExtra {
                default_text: read.source.default,
                ..FactExtra::default()
            });
            return Some(fact);
        }

        self.patterns.document_write.recognize(line).map(|write| {
            UsageFact::new(
                UsageCategory::PersistenceWrite,
                AccessorShape::WriteFrom,
                write.key,
                write.field,
                location,
            )
        })
    }
}

impl ArtifactScanner for PersistenceScanner {
    fn scan(&self, artifact: &str, text: &str) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            if is_comment_line(raw) {
                continue;
            }
            let line = code_part(raw);
            if line.is_empty() {
                continue;
            }
            let location = SourceLocation::new(artifact, idx + 1);
            if let Some(fact) = self.scan_line(line, location) {
                tracing::trace!(
                    line = fact.location.line,
                    category = %fact.category,
                    field = fact.field_name(),
                    "persistence fact"
                );
                events.push(ScanEvent::Fact(fact));
            }
        }
        tracing::debug!(artifact, events = events.len(), "persistence scan complete");
        events
    }
}
