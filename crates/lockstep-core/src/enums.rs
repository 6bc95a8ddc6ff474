//! Usage categories, accessor shapes, type categories, and diagnostic kinds.
//!
//! All enums serialize with `snake_case` except [`UsageCategory`], whose
//! display and serialized names are the identifiers used in completeness
//! diagnostics (`missing DocEntry for port`).

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// UsageCategory
// ---------------------------------------------------------------------------

/// The kind of occurrence a scanner recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UsageCategory {
    PersistenceRead,
    PersistenceWrite,
    RuntimeCheck,
    RuntimeGet,
    RuntimeSet,
    DocEntry,
}

impl UsageCategory {
    /// Order in which the completeness pass reports missing categories.
    pub const COMPLETENESS_ORDER: [Self; 6] = [
        Self::PersistenceWrite,
        Self::PersistenceRead,
        Self::RuntimeCheck,
        Self::RuntimeGet,
        Self::RuntimeSet,
        Self::DocEntry,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersistenceRead => "PersistenceRead",
            Self::PersistenceWrite => "PersistenceWrite",
            Self::RuntimeCheck => "RuntimeCheck",
            Self::RuntimeGet => "RuntimeGet",
            Self::RuntimeSet => "RuntimeSet",
            Self::DocEntry => "DocEntry",
        }
    }
}

impl fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AccessorShape
// ---------------------------------------------------------------------------

/// Syntactic pattern used to read, write, check, or document a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorShape {
    /// `Config.field = doc["key"] | default;`
    DirectAssignment,
    /// `strlcpy(Config.field, src, sizeof(Config.field));`
    BoundedCopy,
    /// `Config.field = atoi(value);`
    ParsedAssignment,
    /// `out += Config.field;`
    ReadInto,
    /// `doc["key"] = Config.field;`
    WriteFrom,
    /// `strcmp(option, "key")`
    OptionCompare,
    /// `| key | type | default | note |`
    DocRow,
}

impl AccessorShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectAssignment => "direct_assignment",
            Self::BoundedCopy => "bounded_copy",
            Self::ParsedAssignment => "parsed_assignment",
            Self::ReadInto => "read_into",
            Self::WriteFrom => "write_from",
            Self::OptionCompare => "option_compare",
            Self::DocRow => "doc_row",
        }
    }
}

impl fmt::Display for AccessorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TypeCategory
// ---------------------------------------------------------------------------

/// Coarse classification of a declared field type.
///
/// The category decides which accessor shapes and setter parsers are valid:
///
/// ```text
/// string_like → bounded copy only (fixed buffers and `char*`)
/// boolean     → direct assignment, boolean parser
/// integer     → direct assignment, integer parser
/// other       → direct assignment, no valid setter
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    StringLike,
    Boolean,
    Integer,
    Other,
}

const INTEGER_TYPES: &[&str] = &[
    "int", "byte", "char", "short", "long", "longlong", "size_t", "int8_t", "int16_t", "int32_t",
    "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
];

impl TypeCategory {
    /// Classify a normalized type string (whitespace removed, array suffix attached).
    #[must_use]
    pub fn classify(normalized: &str) -> Self {
        let unqualified = normalized.trim_start_matches("const");
        // An owned `String` cannot be the target of a bounded copy.
        if unqualified.ends_with(']') || unqualified == "char*" {
            return Self::StringLike;
        }
        if unqualified == "bool" {
            return Self::Boolean;
        }
        let base = unqualified
            .trim_start_matches("unsigned")
            .trim_start_matches("signed");
        let base = if base.is_empty() { "int" } else { base };
        let base = base.strip_suffix("int").filter(|b| !b.is_empty()).unwrap_or(base);
        if INTEGER_TYPES.contains(&base) {
            Self::Integer
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StringLike => "string_like",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DiagnosticKind
// ---------------------------------------------------------------------------

/// Which class of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A key, accessor shape, type, or default disagrees with the schema.
    StructuralMismatch,
    /// A schema field is absent from a required usage category.
    MissingCoverage,
    /// An input could not be interpreted (no schema block, malformed doc row).
    MalformedInput,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StructuralMismatch => "structural_mismatch",
            Self::MissingCoverage => "missing_coverage",
            Self::MalformedInput => "malformed_input",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
