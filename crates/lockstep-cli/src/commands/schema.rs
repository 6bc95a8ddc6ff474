use std::path::Path;

use anyhow::Context;
use lockstep_config::LockstepConfig;
use lockstep_core::TypeCategory;
use lockstep_scan::{SchemaExtraction, SchemaPatterns, extract_schema};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::Outcome;
use crate::output::{self, table::render_table};

#[derive(Debug, Serialize)]
struct SchemaRow<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: &'a str,
    category: TypeCategory,
    line: usize,
}

/// Handle `lockstep schema`.
pub fn handle(root: &Path, config: &LockstepConfig, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let path = config.artifacts.resolved(root).schema;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read schema artifact {}", path.display()))?;

    let patterns = SchemaPatterns::new(&config.patterns)?;
    let extraction = extract_schema(&text, &patterns);
    if extraction.schema.is_empty() {
        anyhow::bail!(
            "{} in {}",
            if extraction.block_found {
                "schema block declares no fields"
            } else {
                "schema block not found"
            },
            path.display()
        );
    }
    for dup in &extraction.duplicates {
        tracing::warn!(
            field = dup.name.as_str(),
            line = dup.line,
            first_line = dup.first_line,
            "duplicate field declaration ignored"
        );
    }

    output::emit(&render(&extraction, flags.format)?);
    Ok(if extraction.duplicates.is_empty() {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}

fn render(extraction: &SchemaExtraction, format: OutputFormat) -> anyhow::Result<String> {
    let rows = extraction
        .schema
        .iter()
        .map(|field| SchemaRow {
            name: &field.name,
            ty: &field.ty,
            category: field.category(),
            line: field.line,
        })
        .collect::<Vec<_>>();

    match format {
        OutputFormat::Json => output::render_json(&rows),
        OutputFormat::Text => {
            let cells = rows
                .iter()
                .map(|row| {
                    vec![
                        row.name.to_string(),
                        row.ty.to_string(),
                        row.category.to_string(),
                        row.line.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            Ok(render_table(&["name", "type", "category", "line"], &cells))
        }
    }
}
