//! Runtime artifact scanner: the console get/set handler.
//!
//! An option-name comparison opens a window; the next recognized get or set
//! closes it and is attributed to the compared key.

use lockstep_core::{AccessorShape, FactExtra, SourceLocation, UsageCategory, UsageFact};

use crate::recognizers::{CodePatterns, code_part, is_comment_line};
use crate::{ArtifactScanner, ScanEvent};

/// Pending-key window between an option compare and the usage it guards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Idle,
    AwaitingUsage { key: String },
}

#[derive(Debug, Clone)]
pub struct RuntimeScanner {
    patterns: CodePatterns,
}

impl RuntimeScanner {
    #[must_use]
    pub const fn new(patterns: CodePatterns) -> Self {
        Self { patterns }
    }

    /// Try the get/set shapes that close an open window.
    fn usage(&self, line: &str, key: &str, location: SourceLocation) -> Option<UsageFact> {
        if let Some(copy) = self.patterns.bounded_copy.recognize(line) {
            return Some(
                UsageFact::new(
                    UsageCategory::RuntimeSet,
                    AccessorShape::BoundedCopy,
                    copy.field,
                    key,
                    location,
                )
                .with_extra(FactExtra {
                    size_of_target: Some(copy.size_of),
                    ..FactExtra::default()
                }),
            );
        }

        if let Some(assign) = self.patterns.parsed_assign.recognize(line) {
            return Some(
                UsageFact::new(
                    UsageCategory::RuntimeSet,
                    AccessorShape::ParsedAssignment,
                    assign.field,
                    key,
                    location,
                )
                .with_extra(FactExtra {
                    parser: assign.parser,
                    ..FactExtra::default()
                }),
            );
        }

        self.patterns.read_into.recognize(line).map(|read| {
            UsageFact::new(
                UsageCategory::RuntimeGet,
                AccessorShape::ReadInto,
                read.field,
                key,
                location,
            )
        })
    }

    fn looks_like_usage(&self, line: &str) -> bool {
        self.patterns.bounded_copy.recognize(line).is_some()
            || self.patterns.parsed_assign.recognize(line).is_some()
            || self.patterns.read_into.recognize(line).is_some()
    }
}

impl ArtifactScanner for RuntimeScanner {
    fn scan(&self, artifact: &str, text: &str) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        let mut state = WindowState::Idle;

        for (idx, raw) in text.lines().enumerate() {
            if is_comment_line(raw) {
                continue;
            }
            let line = code_part(raw);
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;

            let keys = self.patterns.option_compare.keys(line);
            if let Some(last) = keys.last() {
                for key in &keys {
                    tracing::trace!(line = line_no, key = key.as_str(), "option compare");
                    events.push(ScanEvent::Fact(UsageFact::new(
                        UsageCategory::RuntimeCheck,
                        AccessorShape::OptionCompare,
                        key.as_str(),
                        key.as_str(),
                        SourceLocation::new(artifact, line_no),
                    )));
                }
                state = WindowState::AwaitingUsage { key: last.clone() };
                continue;
            }

            match &state {
                WindowState::AwaitingUsage { key } => {
                    let location = SourceLocation::new(artifact, line_no);
                    if let Some(fact) = self.usage(line, key, location) {
                        tracing::trace!(
                            line = line_no,
                            category = %fact.category,
                            field = fact.field_name(),
                            key = key.as_str(),
                            "runtime usage closes window"
                        );
                        events.push(ScanEvent::Fact(fact));
                        state = WindowState::Idle;
                    }
                }
                WindowState::Idle => {
                    if self.looks_like_usage(line) {
                        tracing::debug!(line = line_no, "usage outside an option window ignored");
                    }
                }
            }
        }

        tracing::debug!(artifact, events = events.len(), "runtime scan complete");
        events
    }
}
