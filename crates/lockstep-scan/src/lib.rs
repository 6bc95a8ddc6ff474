//! # lockstep-scan
//!
//! Turns artifact text into structured input for the cross validator.
//!
//! - [`schema::extract_schema`] reads the canonical struct declaration.
//! - [`PersistenceScanner`], [`RuntimeScanner`] and [`DocsScanner`] each walk
//!   one dependent artifact line by line and emit [`ScanEvent`]s in
//!   discovery order.
//!
//! Recognition is purely line-level. Lines that match no recognizer are
//! skipped without comment; there is no grammar for the artifacts.

pub mod docs;
pub mod error;
pub mod persistence;
pub mod recognizers;
pub mod runtime;
pub mod schema;

pub use docs::DocsScanner;
pub use error::ScanError;
pub use persistence::PersistenceScanner;
pub use recognizers::{CodePatterns, SchemaPatterns};
pub use runtime::{RuntimeScanner, WindowState};
pub use schema::{DuplicateField, SchemaExtraction, UnrecognizedLine, extract_schema};

use lockstep_core::{SourceLocation, UsageFact};

/// One result of scanning a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A recognized usage of a field.
    Fact(UsageFact),
    /// A line that looked structural but could not be read.
    Malformed {
        location: SourceLocation,
        message: String,
    },
}

impl ScanEvent {
    #[must_use]
    pub const fn as_fact(&self) -> Option<&UsageFact> {
        match self {
            Self::Fact(fact) => Some(fact),
            Self::Malformed { .. } => None,
        }
    }
}

/// A scanner over a single dependent artifact.
pub trait ArtifactScanner {
    /// Scan `text`, attributing every event to `artifact`.
    fn scan(&self, artifact: &str, text: &str) -> Vec<ScanEvent>;
}

/// Facts only, in order. Mostly useful in tests.
#[must_use]
pub fn facts(events: &[ScanEvent]) -> Vec<&UsageFact> {
    events.iter().filter_map(ScanEvent::as_fact).collect()
}
