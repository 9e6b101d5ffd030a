//! Report document

use crate::engine::AuditResult;
use crate::pagination::RelationshipRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Report header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Total following count as reported by the first page
    pub total_following: u64,
    /// Number of entries in `users`
    pub not_following_back: usize,
    /// Schema version
    pub version: String,
}

/// The JSON document written at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Header
    pub metadata: ReportMetadata,
    /// Accounts that do not follow back, in discovery order
    pub users: Vec<RelationshipRecord>,
}

impl AuditReport {
    /// Build a report from a finished run
    pub fn from_result(result: &AuditResult, generated_at: DateTime<Utc>) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at,
                total_following: result.total_following.unwrap_or(0),
                not_following_back: result.not_following_back(),
                version: SCHEMA_VERSION.to_string(),
            },
            users: result.users.clone(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
