//! The check pipeline: schema, persistence, runtime, docs, completeness.

use lockstep_config::LockstepConfig;
use lockstep_scan::{
    ArtifactScanner, CodePatterns, DocsScanner, PersistenceScanner, RuntimeScanner,
    SchemaPatterns, extract_schema,
};

use crate::artifacts::ArtifactSet;
use crate::completeness::check_completeness;
use crate::error::CheckError;
use crate::report::CheckReport;
use crate::validator::CrossValidator;

/// Run every phase over already-loaded artifacts.
///
/// Only an invalid configuration can fail; every inconsistency in the
/// artifacts themselves ends up in the report.
pub fn check(artifacts: &ArtifactSet, config: &LockstepConfig) -> Result<CheckReport, CheckError> {
    config.validate()?;
    let schema_patterns = SchemaPatterns::new(&config.patterns)?;
    let code_patterns = CodePatterns::new(&config.patterns)?;

    let extraction = extract_schema(&artifacts.schema.text, &schema_patterns);
    tracing::debug!(
        fields = extraction.schema.len(),
        duplicates = extraction.duplicates.len(),
        unrecognized = extraction.unrecognized.len(),
        "schema extracted"
    );

    let mut validator = CrossValidator::new(&extraction.schema, &config.patterns, &config.docs);
    validator.record_duplicates(&artifacts.schema.label, &extraction.duplicates);
    validator.record_unrecognized(&artifacts.schema.label, &extraction.unrecognized);

    if extraction.schema.is_empty() {
        validator.reject_empty_schema(&artifacts.schema.label, extraction.block_found);
        let (diagnostics, facts) = validator.into_parts();
        return Ok(CheckReport {
            schema_fields: Vec::new(),
            facts,
            diagnostics,
        });
    }

    let persistence = PersistenceScanner::new(code_patterns.clone());
    let runtime = RuntimeScanner::new(code_patterns);
    let docs = DocsScanner::new(&config.docs);
    let passes: [(&dyn ArtifactScanner, _); 3] = [
        (&persistence, &artifacts.persistence),
        (&runtime, &artifacts.runtime),
        (&docs, &artifacts.docs),
    ];

    for (scanner, source) in passes {
        for event in scanner.scan(&source.label, &source.text) {
            validator.consume(event);
        }
    }
    tracing::debug!(
        facts = validator.facts().len(),
        defaults = validator.defaults().len(),
        diagnostics = validator.diagnostics().len(),
        "per-fact validation complete"
    );

    let (mut diagnostics, facts) = validator.into_parts();
    check_completeness(
        &extraction.schema,
        &facts,
        move |category| artifacts.label_for(category),
        &mut diagnostics,
    );

    Ok(CheckReport {
        schema_fields: extraction.schema.fields().to_vec(),
        facts,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::SourceText;
    use lockstep_config::PatternConfig;
    use lockstep_core::DiagnosticKind;
    use pretty_assertions::assert_eq;

    fn artifacts(schema: &str) -> ArtifactSet {
        ArtifactSet {
            schema: SourceText::new("config.h", schema),
            persistence: SourceText::new("config.cpp", ""),
            runtime: SourceText::new("console.cpp", ""),
            docs: SourceText::new("README.md", ""),
        }
    }

    #[test]
    fn missing_schema_block_is_the_only_diagnostic() {
        let report = check(&artifacts("int port;\n"), &LockstepConfig::default()).expect("runs");
        let rendered = report
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(rendered, vec!["config.h:-1: schema block not found"]);
        assert_eq!(report.count_kind(DiagnosticKind::MalformedInput), 1);
        assert!(!report.passed());
    }

    #[test]
    fn empty_schema_block_is_reported() {
        let report = check(&artifacts("struct C {\n};\n"), &LockstepConfig::default())
            .expect("runs");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            report.diagnostics.as_slice()[0].message,
            "schema block declares no fields"
        );
    }

    #[test]
    fn invalid_pattern_config_is_rejected_before_scanning() {
        let config = LockstepConfig {
            patterns: PatternConfig {
                instance: "Config.inner".to_string(),
                ..PatternConfig::default()
            },
            ..LockstepConfig::default()
        };
        let err = check(&artifacts("struct C {\n  int port;\n};\n"), &config)
            .expect_err("must fail");
        assert!(matches!(err, CheckError::Config(_)), "{err:?}");
    }
}
