// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # followback-audit
//!
//! Lists the accounts a logged-in user follows that do not follow back.
//!
//! ## Features
//!
//! - **Cursor pagination** over the following list, one request at a time
//! - **Human-like throttling**: bell-shaped per-page delays and periodic
//!   extended rests
//! - **Recovery**: 429 cooldowns and short retries on the same cursor
//! - **JSON report** with a metadata header
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use followback_audit::{
//!     AuditConfig, AuditEngine, AuditReport, FollowingPaginator, HttpClient, ReportWriter,
//!     Session, ThrottleController,
//! };
//!
//! #[tokio::main]
//! async fn main() -> followback_audit::Result<()> {
//!     let config = AuditConfig::default();
//!     config.preflight()?;
//!     let session = Session::from_cookie_header("csrftoken=...; ds_user_id=...")?;
//!
//!     let client = HttpClient::with_config(config.http_client_config())?;
//!     let source = FollowingPaginator::new(client);
//!     let mut engine = AuditEngine::new(
//!         Box::new(source),
//!         ThrottleController::new(config.throttle_config()),
//!     );
//!
//!     let result = engine.run(&session).await?;
//!     let report = AuditReport::from_result(&result, chrono::Utc::now());
//!     ReportWriter::default().write(&report).await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      AuditEngine                         │
//! │   Fetching → Processing → Throttling → … → Finalizing    │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌───────────┬───────────────┼──────────────┬──────────────┐
//! │  Session  │  Pagination   │   Throttle   │    Output    │
//! ├───────────┼───────────────┼──────────────┼──────────────┤
//! │ Cookies   │ GraphQL page  │ Bell delays  │ JSON report  │
//! │ CSRF      │ Cursor        │ Long rests   │ Atomic write │
//! │           │ HTTP client   │ Retry policy │              │
//! └───────────┴───────────────┴──────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Session credentials
pub mod session;

/// HTTP client with rate limiting
pub mod http;

/// Following-list pagination
pub mod pagination;

/// Delays, rests and retry policy
pub mod throttle;

/// Audit loop
pub mod engine;

/// JSON report output
pub mod output;

/// YAML configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use config::AuditConfig;
pub use engine::{AuditEngine, AuditResult};
pub use http::HttpClient;
pub use output::{AuditReport, ReportWriter};
pub use pagination::{FollowingPaginator, PageSource, RelationshipRecord};
pub use session::Session;
pub use throttle::ThrottleController;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
