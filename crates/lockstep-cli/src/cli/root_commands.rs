use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check every artifact against the schema and each other.
    Check(CheckArgs),
    /// Print the fields extracted from the schema declaration.
    Schema,
}

/// Per-run artifact path overrides, relative to the project root.
#[derive(Clone, Debug, Default, Args)]
pub struct CheckArgs {
    /// Header holding the canonical struct declaration
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Code that loads and saves the struct
    #[arg(long)]
    pub persistence: Option<PathBuf>,

    /// Console get/set handler
    #[arg(long)]
    pub runtime: Option<PathBuf>,

    /// Markdown option reference
    #[arg(long)]
    pub docs: Option<PathBuf>,
}
