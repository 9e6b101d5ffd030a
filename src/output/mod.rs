//! Output module
//!
//! Serializes the finished audit into the JSON report and writes it out.
//!
//! # Overview
//!
//! - [`AuditReport`] is the document shape: a metadata block plus the
//!   non-reciprocating accounts.
//! - [`ReportWriter`] writes it pretty-printed, either atomically to a file
//!   or to stdout.

mod report;
mod writer;

pub use report::{AuditReport, ReportMetadata, SCHEMA_VERSION};
pub use writer::{OutputTarget, ReportWriter, DEFAULT_OUTPUT_PATH};
