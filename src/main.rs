// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_async)]

//! followback-audit CLI
//!
//! Command-line interface for running audits

use clap::Parser;
use followback_audit::cli::{Cli, Runner};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
