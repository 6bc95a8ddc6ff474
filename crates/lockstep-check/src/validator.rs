//! Per-fact validation against the schema and the default-value table.

use lockstep_config::{DocsConfig, PatternConfig};
use lockstep_core::{
    AccessorShape, DefaultValueTable, Diagnostic, DiagnosticKind, Diagnostics, Schema,
    SchemaField, TypeCategory, UsageCategory, UsageFact, normalize_default,
};
use lockstep_scan::{DuplicateField, ScanEvent, UnrecognizedLine};

pub const NAME_MISMATCH: &str = "key/field name mismatch";
pub const UNKNOWN_FIELD: &str = "reference to unknown field";
pub const STRING_WRONG_ACCESSOR: &str = "string type via wrong accessor";
pub const NON_STRING_BOUNDED_COPY: &str = "non-string type via bounded copy";
pub const SIZEOF_MISMATCH: &str = "sizeof target mismatch";
pub const MISSING_DEFAULT: &str = "missing default";
pub const WRONG_BOOL_SETTER: &str = "wrong setter for boolean";
pub const WRONG_INT_SETTER: &str = "wrong setter for integer";
pub const NO_SETTER_SHAPE: &str = "no valid setter shape";
pub const TYPE_MISMATCH: &str = "type mismatch";
pub const DEFAULT_MISMATCH: &str = "default mismatch";
pub const DUPLICATE_FIELD: &str = "duplicate field declaration";
pub const SCHEMA_NOT_FOUND: &str = "schema block not found";
pub const SCHEMA_EMPTY: &str = "schema block declares no fields";
pub const UNRECOGNIZED_SCHEMA_LINE: &str = "unrecognized line in schema block";

/// Validates facts as they arrive and keeps the run's accumulated state.
///
/// Facts must be fed in pipeline order: persistence before documentation,
/// so that doc defaults are compared against what persistence recorded.
#[derive(Debug)]
pub struct CrossValidator<'a> {
    schema: &'a Schema,
    patterns: &'a PatternConfig,
    docs: &'a DocsConfig,
    diagnostics: Diagnostics,
    defaults: DefaultValueTable,
    facts: Vec<UsageFact>,
}

impl<'a> CrossValidator<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema, patterns: &'a PatternConfig, docs: &'a DocsConfig) -> Self {
        Self {
            schema,
            patterns,
            docs,
            diagnostics: Diagnostics::new(),
            defaults: DefaultValueTable::new(),
            facts: Vec::new(),
        }
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub const fn defaults(&self) -> &DefaultValueTable {
        &self.defaults
    }

    #[must_use]
    pub fn facts(&self) -> &[UsageFact] {
        &self.facts
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report later declarations of an already declared field.
    pub fn record_duplicates(&mut self, artifact: &str, duplicates: &[DuplicateField]) {
        for dup in duplicates {
            self.diagnostics.push(Diagnostic {
                artifact: artifact.to_string(),
                line: Some(dup.line),
                kind: DiagnosticKind::StructuralMismatch,
                message: format!(
                    "{DUPLICATE_FIELD}: `{}` already declared on line {}",
                    dup.name, dup.first_line
                ),
            });
        }
    }

    /// Report lines in the schema block that could hide a field.
    pub fn record_unrecognized(&mut self, artifact: &str, lines: &[UnrecognizedLine]) {
        for unrecognized in lines {
            self.diagnostics.push(Diagnostic {
                artifact: artifact.to_string(),
                line: Some(unrecognized.line),
                kind: DiagnosticKind::MalformedInput,
                message: format!("{UNRECOGNIZED_SCHEMA_LINE}: `{}`", unrecognized.text),
            });
        }
    }

    /// Report an unusable schema. Nothing downstream is checked after this.
    pub fn reject_empty_schema(&mut self, artifact: &str, block_found: bool) {
        let message = if block_found {
            SCHEMA_EMPTY
        } else {
            SCHEMA_NOT_FOUND
        };
        tracing::warn!(artifact, message, "schema unusable; skipping remaining checks");
        self.diagnostics.push(Diagnostic::unlocated(
            artifact,
            DiagnosticKind::MalformedInput,
            message,
        ));
    }

    pub fn consume(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Fact(fact) => {
                self.validate(&fact);
                self.facts.push(fact);
            }
            ScanEvent::Malformed { location, message } => {
                self.diagnostics.push(Diagnostic::at(
                    &location,
                    DiagnosticKind::MalformedInput,
                    message,
                ));
            }
        }
    }

    fn mismatch(&mut self, fact: &UsageFact, message: String) {
        tracing::trace!(location = %fact.location, message = message.as_str(), "diagnostic");
        self.diagnostics.push(Diagnostic::at(
            &fact.location,
            DiagnosticKind::StructuralMismatch,
            message,
        ));
    }

    /// Run every per-fact check in order.
    pub fn validate(&mut self, fact: &UsageFact) {
        if !matches!(
            fact.category,
            UsageCategory::DocEntry | UsageCategory::RuntimeCheck
        ) && fact.observed_key != fact.referenced_key
        {
            self.mismatch(
                fact,
                format!(
                    "{NAME_MISMATCH}: field `{}` used with key `{}`",
                    fact.field_name(),
                    fact.external_key()
                ),
            );
        }

        let schema = self.schema;
        let Some(field) = schema.get(fact.field_name()) else {
            self.mismatch(fact, format!("{UNKNOWN_FIELD}: `{}`", fact.field_name()));
            return;
        };
        let category = field.category();

        self.check_accessor(fact, field, category);
        self.check_size_of(fact, field);

        match fact.category {
            UsageCategory::PersistenceRead => self.check_default(fact, field),
            UsageCategory::RuntimeSet if fact.accessor == AccessorShape::ParsedAssignment => {
                self.check_setter(fact, field, category);
            }
            UsageCategory::DocEntry => self.check_doc_row(fact, field, category),
            _ => {}
        }
    }

    fn check_accessor(&mut self, fact: &UsageFact, field: &SchemaField, category: TypeCategory) {
        let is_string = category == TypeCategory::StringLike;
        match fact.accessor {
            AccessorShape::DirectAssignment
                if is_string && fact.category == UsageCategory::PersistenceRead =>
            {
                self.mismatch(
                    fact,
                    format!(
                        "{STRING_WRONG_ACCESSOR}: `{}` is `{}` and must be read with a bounded copy",
                        field.name, field.ty
                    ),
                );
            }
            AccessorShape::BoundedCopy if !is_string => {
                self.mismatch(
                    fact,
                    format!(
                        "{NON_STRING_BOUNDED_COPY}: `{}` is `{}`",
                        field.name, field.ty
                    ),
                );
            }
            _ => {}
        }
    }

    fn check_size_of(&mut self, fact: &UsageFact, field: &SchemaField) {
        if fact.accessor != AccessorShape::BoundedCopy {
            return;
        }
        if let Some(target) = fact.extra.size_of_target.as_deref() {
            if target != field.name {
                self.mismatch(
                    fact,
                    format!(
                        "{SIZEOF_MISMATCH}: copy into `{}` bounded by sizeof `{target}`",
                        field.name
                    ),
                );
            }
        }
    }

    fn check_default(&mut self, fact: &UsageFact, field: &SchemaField) {
        match fact.extra.default_text.as_deref() {
            Some(text) => {
                if !self.defaults.record(&field.name, text) {
                    tracing::debug!(
                        field = field.name.as_str(),
                        "default already recorded; keeping first"
                    );
                }
            }
            None => self.mismatch(fact, format!("{MISSING_DEFAULT}: `{}`", field.name)),
        }
    }

    fn check_setter(&mut self, fact: &UsageFact, field: &SchemaField, category: TypeCategory) {
        let parser = fact.extra.parser.as_deref();
        let uses = |allowed: &[String]| parser.is_some_and(|p| allowed.iter().any(|a| a == p));
        let shown = parser.unwrap_or("plain assignment");

        let message = match category {
            TypeCategory::Boolean if !uses(&self.patterns.bool_parsers) => {
                format!("{WRONG_BOOL_SETTER}: `{}` set via {shown}", field.name)
            }
            TypeCategory::Integer if !uses(&self.patterns.int_parsers) => {
                format!("{WRONG_INT_SETTER}: `{}` set via {shown}", field.name)
            }
            TypeCategory::StringLike => format!(
                "{STRING_WRONG_ACCESSOR}: `{}` is `{}` and must be set with a bounded copy",
                field.name, field.ty
            ),
            TypeCategory::Other => {
                format!("{NO_SETTER_SHAPE}: `{}` is `{}`", field.name, field.ty)
            }
            TypeCategory::Boolean | TypeCategory::Integer => return,
        };
        self.mismatch(fact, message);
    }

    fn check_doc_row(&mut self, fact: &UsageFact, field: &SchemaField, category: TypeCategory) {
        let expected = doc_type_label(field, category, self.docs);
        if let Some(written) = fact.extra.doc_type.as_deref() {
            if written != expected {
                self.mismatch(
                    fact,
                    format!(
                        "{TYPE_MISMATCH}: `{}` documented as `{written}`, expected `{expected}`",
                        field.name
                    ),
                );
            }
        }

        let Some(recorded) = self.defaults.get(&field.name) else {
            return;
        };
        let documented = fact.extra.doc_default.as_deref().unwrap_or_default();
        if normalize_default(documented) != normalize_default(recorded) {
            let message = format!(
                "{DEFAULT_MISMATCH}: `{}` documented as `{}`, persistence uses `{}`",
                field.name,
                normalize_default(documented),
                normalize_default(recorded)
            );
            self.mismatch(fact, message);
        }
    }

    /// Finish per-fact validation and hand back the collected state.
    #[must_use]
    pub fn into_parts(self) -> (Diagnostics, Vec<UsageFact>) {
        (self.diagnostics, self.facts)
    }
}

/// Type label the documentation table is expected to use for a field.
#[must_use]
pub fn doc_type_label(field: &SchemaField, category: TypeCategory, docs: &DocsConfig) -> String {
    match category {
        TypeCategory::StringLike => docs.string_label.clone(),
        TypeCategory::Boolean => docs.bool_label.clone(),
        TypeCategory::Integer | TypeCategory::Other => capitalize(&field.ty),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_core::{FactExtra, SourceLocation};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn schema() -> Schema {
        [
            SchemaField::new("ssid", "char[32]", 2),
            SchemaField::new("port", "int", 3),
            SchemaField::new("enabled", "bool", 4),
            SchemaField::new("gain", "float", 5),
            SchemaField::new("name", "String", 6),
        ]
        .into_iter()
        .collect()
    }

    fn fact(
        category: UsageCategory,
        accessor: AccessorShape,
        observed: &str,
        referenced: &str,
        extra: FactExtra,
    ) -> UsageFact {
        UsageFact::new(
            category,
            accessor,
            observed,
            referenced,
            SourceLocation::new("a.cpp", 7),
        )
        .with_extra(extra)
    }

    fn messages(facts: &[UsageFact]) -> Vec<String> {
        let schema = schema();
        let patterns = PatternConfig::default();
        let docs = DocsConfig::default();
        let mut validator = CrossValidator::new(&schema, &patterns, &docs);
        for fact in facts {
            validator.validate(fact);
        }
        validator
            .diagnostics()
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }

    fn with_default(text: &str) -> FactExtra {
        FactExtra {
            default_text: Some(text.to_string()),
            ..FactExtra::default()
        }
    }

    fn with_parser(parser: Option<&str>) -> FactExtra {
        FactExtra {
            parser: parser.map(str::to_string),
            ..FactExtra::default()
        }
    }

    fn doc_row(ty: &str, default: &str) -> FactExtra {
        FactExtra {
            doc_type: Some(ty.to_string()),
            doc_default: Some(default.to_string()),
            ..FactExtra::default()
        }
    }

    #[test]
    fn correct_direct_read_is_clean() {
        let read = fact(
            UsageCategory::PersistenceRead,
            AccessorShape::DirectAssignment,
            "port",
            "port",
            with_default("80"),
        );
        assert!(messages(&[read]).is_empty());
    }

    #[test]
    fn owned_string_reads_by_direct_assignment() {
        let facts = [
            fact(
                UsageCategory::PersistenceRead,
                AccessorShape::DirectAssignment,
                "name",
                "name",
                with_default("\"dev\""),
            ),
            fact(
                UsageCategory::DocEntry,
                AccessorShape::DocRow,
                "name",
                "name",
                doc_row("String", "`dev`"),
            ),
        ];
        assert_eq!(messages(&facts), Vec::<String>::new());
    }

    #[test]
    fn name_mismatch_reports_once() {
        let read = fact(
            UsageCategory::PersistenceRead,
            AccessorShape::DirectAssignment,
            "port",
            "http_port",
            with_default("1"),
        );
        let found = messages(&[read]);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with(NAME_MISMATCH));
    }

    #[test]
    fn unknown_field_stops_further_checks() {
        let read = fact(
            UsageCategory::PersistenceRead,
            AccessorShape::DirectAssignment,
            "timeout",
            "timeout",
            FactExtra::default(),
        );
        assert_eq!(messages(&[read]), vec![format!("{UNKNOWN_FIELD}: `timeout`")]);
    }

    #[rstest]
    #[case::string_read_direct(
        UsageCategory::PersistenceRead,
        AccessorShape::DirectAssignment,
        "ssid",
        with_default("\"\""),
        STRING_WRONG_ACCESSOR
    )]
    #[case::int_read_bounded(
        UsageCategory::PersistenceRead,
        AccessorShape::BoundedCopy,
        "port",
        FactExtra { size_of_target: Some("port".into()), ..with_default("80") },
        NON_STRING_BOUNDED_COPY
    )]
    #[case::int_set_bounded(
        UsageCategory::RuntimeSet,
        AccessorShape::BoundedCopy,
        "port",
        FactExtra { size_of_target: Some("port".into()), ..FactExtra::default() },
        NON_STRING_BOUNDED_COPY
    )]
    #[case::read_without_default(
        UsageCategory::PersistenceRead,
        AccessorShape::DirectAssignment,
        "port",
        FactExtra::default(),
        MISSING_DEFAULT
    )]
    #[case::bool_set_via_atoi(
        UsageCategory::RuntimeSet,
        AccessorShape::ParsedAssignment,
        "enabled",
        with_parser(Some("atoi")),
        WRONG_BOOL_SETTER
    )]
    #[case::int_set_unparsed(
        UsageCategory::RuntimeSet,
        AccessorShape::ParsedAssignment,
        "port",
        with_parser(None),
        WRONG_INT_SETTER
    )]
    #[case::string_set_parsed(
        UsageCategory::RuntimeSet,
        AccessorShape::ParsedAssignment,
        "ssid",
        with_parser(None),
        STRING_WRONG_ACCESSOR
    )]
    #[case::float_set(
        UsageCategory::RuntimeSet,
        AccessorShape::ParsedAssignment,
        "gain",
        with_parser(Some("atof")),
        NO_SETTER_SHAPE
    )]
    #[case::owned_string_read_bounded(
        UsageCategory::PersistenceRead,
        AccessorShape::BoundedCopy,
        "name",
        FactExtra { size_of_target: Some("name".into()), ..with_default("\"dev\"") },
        NON_STRING_BOUNDED_COPY
    )]
    #[case::owned_string_set_parsed(
        UsageCategory::RuntimeSet,
        AccessorShape::ParsedAssignment,
        "name",
        with_parser(None),
        NO_SETTER_SHAPE
    )]
    #[case::doc_type_label(
        UsageCategory::DocEntry,
        AccessorShape::DocRow,
        "port",
        doc_row("Integer", ""),
        TYPE_MISMATCH
    )]
    fn single_shape_violation(
        #[case] category: UsageCategory,
        #[case] accessor: AccessorShape,
        #[case] name: &str,
        #[case] extra: FactExtra,
        #[case] expected: &str,
    ) {
        let found = messages(&[fact(category, accessor, name, name, extra)]);
        assert_eq!(found.len(), 1, "{found:?}");
        assert!(found[0].starts_with(expected), "{found:?}");
    }

    #[rstest]
    #[case("enabled", Some("atob"))]
    #[case("port", Some("atoi"))]
    #[case("port", Some("atol"))]
    fn accepted_setters(#[case] name: &str, #[case] parser: Option<&str>) {
        let set = fact(
            UsageCategory::RuntimeSet,
            AccessorShape::ParsedAssignment,
            name,
            name,
            with_parser(parser),
        );
        assert!(messages(&[set]).is_empty());
    }

    #[test]
    fn sizeof_target_must_match_copy_target() {
        let copy = fact(
            UsageCategory::PersistenceRead,
            AccessorShape::BoundedCopy,
            "ssid",
            "ssid",
            FactExtra {
                size_of_target: Some("hostname".to_string()),
                ..with_default("\"\"")
            },
        );
        let found = messages(&[copy]);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with(SIZEOF_MISMATCH));
    }

    #[rstest]
    #[case("10", "10", 0)]
    #[case("10", "`10`", 0)]
    #[case("\"eom\"", "`eom`", 0)]
    #[case("10", "5", 1)]
    #[case("10", "", 1)]
    fn doc_default_compares_against_first_recorded(
        #[case] persisted: &str,
        #[case] documented: &str,
        #[case] expected: usize,
    ) {
        let read = fact(
            UsageCategory::PersistenceRead,
            AccessorShape::DirectAssignment,
            "port",
            "port",
            with_default(persisted),
        );
        let later_read = fact(
            UsageCategory::PersistenceRead,
            AccessorShape::DirectAssignment,
            "port",
            "port",
            with_default(documented),
        );
        let row = fact(
            UsageCategory::DocEntry,
            AccessorShape::DocRow,
            "port",
            "port",
            doc_row("Int", documented),
        );
        let found = messages(&[read, later_read, row]);
        let mismatches = found
            .iter()
            .filter(|m| m.starts_with(DEFAULT_MISMATCH))
            .count();
        assert_eq!(mismatches, expected, "{found:?}");
    }

    #[test]
    fn doc_row_without_recorded_default_is_not_compared() {
        let row = fact(
            UsageCategory::DocEntry,
            AccessorShape::DocRow,
            "enabled",
            "enabled",
            doc_row("Boolean", "whatever"),
        );
        assert!(messages(&[row]).is_empty());
    }

    #[test]
    fn doc_type_labels_follow_category() {
        let docs = DocsConfig::default();
        let labels = schema()
            .iter()
            .map(|f| doc_type_label(f, f.category(), &docs))
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["String", "Int", "Boolean", "Float", "String"]);
    }

    #[test]
    fn unrecognized_schema_lines_are_malformed_input() {
        let schema = schema();
        let patterns = PatternConfig::default();
        let docs = DocsConfig::default();
        let mut validator = CrossValidator::new(&schema, &patterns, &docs);
        validator.record_unrecognized(
            "config.h",
            &[UnrecognizedLine {
                line: 9,
                text: "int a, b;".to_string(),
            }],
        );
        let rendered = validator
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            rendered,
            vec![format!("config.h:9: {UNRECOGNIZED_SCHEMA_LINE}: `int a, b;`")]
        );
        assert_eq!(validator.diagnostics().count_kind(DiagnosticKind::MalformedInput), 1);
    }

    #[test]
    fn malformed_event_becomes_malformed_input() {
        let schema = schema();
        let patterns = PatternConfig::default();
        let docs = DocsConfig::default();
        let mut validator = CrossValidator::new(&schema, &patterns, &docs);
        validator.consume(ScanEvent::Malformed {
            location: SourceLocation::new("README.md", 12),
            message: "malformed documentation row: expected 4 cells, found 2".to_string(),
        });
        let (diagnostics, facts) = validator.into_parts();
        assert!(facts.is_empty());
        assert_eq!(diagnostics.count_kind(DiagnosticKind::MalformedInput), 1);
        assert_eq!(diagnostics.as_slice()[0].line, Some(12));
    }
}
