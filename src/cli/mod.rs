//! CLI module
//!
//! Command-line interface for running audits.
//!
//! # Commands
//!
//! - `run` - Run the audit and write the report
//! - `check` - Validate config and session, fetch the first page once
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{resolve_session, Runner};
