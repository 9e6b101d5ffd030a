//! Report writer

use super::report::AuditReport;
use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Default report file name
pub const DEFAULT_OUTPUT_PATH: &str = "audit_data.json";

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A file, replaced atomically
    File(PathBuf),
    /// Standard output
    Stdout,
}

impl OutputTarget {
    /// Parse a target; `-` means stdout
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_OUTPUT_PATH))
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("-"),
        }
    }
}

/// Writes reports to an [`OutputTarget`]
#[derive(Debug, Clone, Default)]
pub struct ReportWriter {
    target: OutputTarget,
}

impl ReportWriter {
    /// Create a writer for the target
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    /// Get the target
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Serialize and write the report
    pub async fn write(&self, report: &AuditReport) -> Result<()> {
        let contents = report
            .to_json_pretty()
            .map_err(|e| Error::output(format!("Failed to serialize report: {e}")))?;

        match &self.target {
            OutputTarget::File(path) => write_atomic(path, &contents).await?,
            OutputTarget::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(contents.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!(
            target = %self.target,
            users = report.users.len(),
            "Report written"
        );
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the destination
async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    debug!(path = %temp_path.display(), "Writing temp report");

    tokio::fs::write(&temp_path, contents)
        .await
        .map_err(|e| Error::output(format!("Failed to write {}: {e}", temp_path.display())))?;

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| Error::output(format!("Failed to rename report file: {e}")))?;

    Ok(())
}
