//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Find the accounts you follow that do not follow you back
#[derive(Parser, Debug)]
#[command(name = "followback-audit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Browser cookie header for a logged-in session
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    /// File containing the cookie header
    #[arg(long, global = true)]
    pub cookie_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the audit and write the report
    Run {
        /// Report path, or `-` for stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Abort after this many consecutive failures on one page
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Records requested per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Validate config and session, then fetch the first page once
    Check,

    /// Print the effective configuration as YAML
    Config,
}
