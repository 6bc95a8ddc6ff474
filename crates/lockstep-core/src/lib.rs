//! # lockstep-core
//!
//! Core types shared across all lockstep crates:
//! - Schema fields and their type categories
//! - Usage facts emitted by the artifact scanners
//! - The append-only diagnostics collector
//! - The first-writer-wins default-value table
//!
//! Everything here is scratch state for a single check run. Nothing is global;
//! each phase receives the values it reads and writes explicitly.

pub mod defaults;
pub mod diagnostics;
pub mod enums;
pub mod facts;
pub mod schema;

pub use defaults::{DefaultValueTable, normalize_default};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use enums::{AccessorShape, DiagnosticKind, TypeCategory, UsageCategory};
pub use facts::{FactExtra, SourceLocation, UsageFact};
pub use schema::{Schema, SchemaField};
