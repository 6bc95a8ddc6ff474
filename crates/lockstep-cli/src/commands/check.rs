use std::path::Path;

use anyhow::Context;
use lockstep_check::CheckReport;
use lockstep_config::LockstepConfig;

use crate::cli::{CheckArgs, GlobalFlags, OutputFormat};
use crate::commands::Outcome;
use crate::output;

/// Handle `lockstep check`.
pub fn handle(
    args: &CheckArgs,
    root: &Path,
    mut config: LockstepConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    apply_overrides(&mut config, args);

    let report = lockstep_check::check_project(root, &config)
        .with_context(|| format!("check failed in {}", root.display()))?;
    tracing::info!(
        fields = report.schema_fields.len(),
        facts = report.facts.len(),
        diagnostics = report.diagnostics.len(),
        "check complete"
    );

    output::emit(&render(&report, flags)?);
    Ok(if report.passed() {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}

fn apply_overrides(config: &mut LockstepConfig, args: &CheckArgs) {
    let artifacts = &mut config.artifacts;
    if let Some(path) = &args.schema {
        artifacts.schema.clone_from(path);
    }
    if let Some(path) = &args.persistence {
        artifacts.persistence.clone_from(path);
    }
    if let Some(path) = &args.runtime {
        artifacts.runtime.clone_from(path);
    }
    if let Some(path) = &args.docs {
        artifacts.docs.clone_from(path);
    }
}

fn render(report: &CheckReport, flags: &GlobalFlags) -> anyhow::Result<String> {
    match flags.format {
        OutputFormat::Json => Ok(report.render_json()?),
        OutputFormat::Text if flags.quiet => Ok(report
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Text => Ok(report.render_text()),
    }
}
