pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::types::Severity;

#[derive(Parser, Debug)]
#[command(
    name = "suppressor",
    version,
    about = "Filter static-analysis diagnostics through suppression rules"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Rule sources given on the command line, on top of the config file.
#[derive(clap::Args, Debug, Default)]
pub struct RuleArgs {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rule file with one `id[:file[:line]]` per line
    #[arg(short, long)]
    pub suppressions: Option<PathBuf>,

    /// Structured rule document (JSON, or TOML by extension)
    #[arg(long)]
    pub structured: Option<PathBuf>,

    /// Inline rule, same format as a rule file line (repeatable)
    #[arg(long = "suppress", value_name = "RULE")]
    pub suppress: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drop suppressed diagnostics from a JSON report
    Check {
        /// Diagnostics report (JSON), or `-` for stdin
        input: PathBuf,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Minimum severity that causes a non-zero exit code
        #[arg(long, default_value = "error")]
        fail_on: Severity,

        /// Do not report rules that suppressed nothing
        #[arg(long)]
        no_unmatched: bool,

        /// Also report unmatched unusedFunction rules
        #[arg(long)]
        unused_function_checking: bool,
    },
    /// Create a default .suppressorrc.toml
    Init,
    /// Load and validate the configured rules, then list them
    Rules {
        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}
