use clap::Parser;

mod cli;
mod commands;
mod output;

use commands::Outcome;

/// Exit status for errors that prevented a check from running at all.
const FATAL_EXIT_CODE: i32 = 2;

fn main() {
    match run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(error) => {
            eprintln!("lockstep error: {error:#}");
            std::process::exit(FATAL_EXIT_CODE);
        }
    }
}

fn run() -> anyhow::Result<Outcome> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;

    let project_root = commands::resolve_project_root(flags.project.as_deref())?;
    let config = commands::load_config(&project_root, &flags)?;
    tracing::debug!(root = %project_root.display(), "configuration loaded");

    match &cli.command {
        cli::Commands::Check(args) => commands::check::handle(args, &project_root, config, &flags),
        cli::Commands::Schema => commands::schema::handle(&project_root, &config, &flags),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LOCKSTEP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
