//! Command-line argument definitions for the swimlane CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the routing seed, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the swimlane layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram (JSON)
    #[arg(help = "Path to the input diagram file")]
    pub input: String,

    /// Path to the task-to-role assignment (JSON)
    #[arg(short, long)]
    pub roles: String,

    /// Path to the output diagram (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for connector jitter, overrides the configured seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
