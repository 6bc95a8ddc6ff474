//! Documentation table scanner.

use lockstep_config::DocsConfig;
use lockstep_core::{AccessorShape, FactExtra, SourceLocation, UsageCategory, UsageFact};

use crate::recognizers::{fence_marker, is_separator_row, strip_code_span, table_cells};
use crate::{ArtifactScanner, ScanEvent};

/// Cells in a well-formed row: key, type, default, note.
const ROW_CELLS: usize = 4;

/// Emits one `DocEntry` per four-cell markdown table row.
///
/// Rows inside fenced code blocks are example text, not documentation.
#[derive(Debug, Clone, Copy)]
pub struct DocsScanner {
    flag_malformed_rows: bool,
}

impl DocsScanner {
    #[must_use]
    pub const fn new(config: &DocsConfig) -> Self {
        Self {
            flag_malformed_rows: config.flag_malformed_rows,
        }
    }

    fn malformed(&self, events: &mut Vec<ScanEvent>, location: SourceLocation, message: String) {
        tracing::debug!(%location, message = message.as_str(), "malformed documentation row");
        if self.flag_malformed_rows {
            events.push(ScanEvent::Malformed { location, message });
        }
    }
}

impl Default for DocsScanner {
    fn default() -> Self {
        Self::new(&DocsConfig::default())
    }
}

impl ArtifactScanner for DocsScanner {
    fn scan(&self, artifact: &str, text: &str) -> Vec<ScanEvent> {
        let lines = text.lines().collect::<Vec<_>>();
        let mut events = Vec::new();
        let mut open_fence: Option<&str> = None;

        for (idx, raw) in lines.iter().enumerate() {
            if let Some(marker) = fence_marker(raw) {
                open_fence = match open_fence {
                    None => Some(marker),
                    Some(open) if marker.starts_with(open) => None,
                    still_open => still_open,
                };
                continue;
            }
            if open_fence.is_some() {
                continue;
            }
            if !raw.trim_start().starts_with('|') || is_separator_row(raw) {
                continue;
            }
            if lines.get(idx + 1).is_some_and(|next| is_separator_row(next)) {
                tracing::trace!(line = idx + 1, "table header row");
                continue;
            }
            let Some(cells) = table_cells(raw) else {
                continue;
            };
            let location = SourceLocation::new(artifact, idx + 1);

            if cells.len() != ROW_CELLS {
                let message = format!(
                    "malformed documentation row: expected {ROW_CELLS} cells, found {}",
                    cells.len()
                );
                self.malformed(&mut events, location, message);
                continue;
            }

            let key = strip_code_span(cells[0]);
            if key.is_empty() {
                self.malformed(
                    &mut events,
                    location,
                    "malformed documentation row: empty key cell".to_string(),
                );
                continue;
            }

            tracing::trace!(line = location.line, key, "doc entry");
            let fact = UsageFact::new(
                UsageCategory::DocEntry,
                AccessorShape::DocRow,
                key,
                key,
                location,
            )
            .with_extra(FactExtra {
                doc_type: Some(strip_code_span(cells[1]).to_string()),
                doc_default: Some(cells[2].to_string()),
                ..FactExtra::default()
            });
            events.push(ScanEvent::Fact(fact));
        }

        tracing::debug!(artifact, events = events.len(), "documentation scan complete");
        events
    }
}
