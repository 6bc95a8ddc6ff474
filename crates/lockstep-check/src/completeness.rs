//! Completeness pass: every schema field in every usage category.

use std::collections::HashSet;

use lockstep_core::{Diagnostic, DiagnosticKind, Diagnostics, Schema, UsageCategory, UsageFact};

/// Append one `missing <Category> for <field>` per absent pair.
///
/// Fields are visited in declaration order and categories in
/// [`UsageCategory::COMPLETENESS_ORDER`], so output order is stable.
pub fn check_completeness<'a>(
    schema: &Schema,
    facts: &[UsageFact],
    artifact_for: impl Fn(UsageCategory) -> &'a str,
    diagnostics: &mut Diagnostics,
) {
    let seen = facts
        .iter()
        .map(|fact| (fact.category, fact.field_name()))
        .collect::<HashSet<_>>();

    let before = diagnostics.len();
    for field in schema.iter() {
        for category in UsageCategory::COMPLETENESS_ORDER {
            if seen.contains(&(category, field.name.as_str())) {
                continue;
            }
            diagnostics.push(Diagnostic::unlocated(
                artifact_for(category),
                DiagnosticKind::MissingCoverage,
                format!("missing {category} for {}", field.name),
            ));
        }
    }
    tracing::debug!(
        fields = schema.len(),
        missing = diagnostics.len() - before,
        "completeness pass complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_core::{AccessorShape, SchemaField, SourceLocation};
    use pretty_assertions::assert_eq;

    fn all_categories(field: &str) -> Vec<UsageFact> {
        [
            (UsageCategory::PersistenceRead, AccessorShape::DirectAssignment),
            (UsageCategory::PersistenceWrite, AccessorShape::WriteFrom),
            (UsageCategory::RuntimeCheck, AccessorShape::OptionCompare),
            (UsageCategory::RuntimeGet, AccessorShape::ReadInto),
            (UsageCategory::RuntimeSet, AccessorShape::ParsedAssignment),
            (UsageCategory::DocEntry, AccessorShape::DocRow),
        ]
        .into_iter()
        .map(|(category, accessor)| {
            UsageFact::new(category, accessor, field, field, SourceLocation::new("x", 1))
        })
        .collect()
    }

    fn label(category: UsageCategory) -> &'static str {
        match category {
            UsageCategory::DocEntry => "README.md",
            UsageCategory::PersistenceRead | UsageCategory::PersistenceWrite => "config.cpp",
            _ => "console.cpp",
        }
    }

    fn run(schema: &Schema, facts: &[UsageFact]) -> Vec<String> {
        let mut diagnostics = Diagnostics::new();
        check_completeness(schema, facts, label, &mut diagnostics);
        diagnostics.iter().map(ToString::to_string).collect()
    }

    fn schema() -> Schema {
        [SchemaField::new("ssid", "char[32]", 1), SchemaField::new("port", "int", 2)]
            .into_iter()
            .collect()
    }

    #[test]
    fn full_coverage_is_clean() {
        let mut facts = all_categories("ssid");
        facts.extend(all_categories("port"));
        assert!(run(&schema(), &facts).is_empty());
    }

    #[test]
    fn one_missing_category_yields_one_diagnostic() {
        let mut facts = all_categories("ssid");
        facts.extend(
            all_categories("port")
                .into_iter()
                .filter(|f| f.category != UsageCategory::RuntimeGet),
        );
        assert_eq!(
            run(&schema(), &facts),
            vec!["console.cpp:-1: missing RuntimeGet for port"]
        );
    }

    #[test]
    fn absent_field_reports_every_category_in_order() {
        let facts = all_categories("ssid");
        assert_eq!(
            run(&schema(), &facts),
            vec![
                "config.cpp:-1: missing PersistenceWrite for port",
                "config.cpp:-1: missing PersistenceRead for port",
                "console.cpp:-1: missing RuntimeCheck for port",
                "console.cpp:-1: missing RuntimeGet for port",
                "console.cpp:-1: missing RuntimeSet for port",
                "README.md:-1: missing DocEntry for port",
            ]
        );
    }

    #[test]
    fn write_coverage_uses_referenced_field() {
        let write = UsageFact::new(
            UsageCategory::PersistenceWrite,
            AccessorShape::WriteFrom,
            "wifi",
            "ssid",
            SourceLocation::new("config.cpp", 9),
        );
        let found = run(&schema(), &[write]);
        assert!(!found.iter().any(|m| m.ends_with("missing PersistenceWrite for ssid")));
        assert!(found.iter().any(|m| m.ends_with("missing PersistenceWrite for port")));
    }
}
