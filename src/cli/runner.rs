//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::AuditConfig;
use crate::engine::AuditEngine;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::output::{AuditReport, OutputTarget, ReportWriter};
use crate::pagination::{FollowingPaginator, PageCursor, PageSource};
use crate::session::{Session, COOKIE_ENV_VAR};
use crate::throttle::ThrottleController;
use chrono::Utc;
use serde_json::json;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                output,
                max_attempts,
                page_size,
            } => {
                let mut config = self.load_config()?;
                if let Some(path) = output {
                    config.output.path.clone_from(path);
                }
                if max_attempts.is_some() {
                    config.retry.max_attempts = *max_attempts;
                }
                if let Some(size) = page_size {
                    config.api.page_size = *size;
                }
                config.validate()?;
                self.audit(&config).await
            }
            Commands::Check => self.check().await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load the config file, or defaults when none is given
    fn load_config(&self) -> Result<AuditConfig> {
        match &self.cli.config {
            Some(path) => AuditConfig::load(path),
            None => Ok(AuditConfig::default()),
        }
    }

    fn session(&self) -> Result<Session> {
        resolve_session(
            self.cli.cookie.as_deref(),
            self.cli.cookie_file.as_deref(),
            std::env::var(COOKIE_ENV_VAR).ok().as_deref(),
        )
    }

    fn paginator(config: &AuditConfig) -> Result<FollowingPaginator> {
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(FollowingPaginator::new(client)
            .with_query_hash(config.api.query_hash.clone())
            .with_page_size(config.api.page_size))
    }

    /// Run the full audit and write the report
    async fn audit(&self, config: &AuditConfig) -> Result<()> {
        config.preflight()?;
        let session = self.session()?;

        info!(
            user_id = session.user_id(),
            output = %config.output.path,
            "Starting audit"
        );

        let source = Self::paginator(config)?;
        let throttle = ThrottleController::new(config.throttle_config());
        let mut engine =
            AuditEngine::new(Box::new(source), throttle).with_retry_policy(config.retry_policy());

        let result = engine.run(&session).await?;
        let report = AuditReport::from_result(&result, Utc::now());

        ReportWriter::new(OutputTarget::parse(&config.output.path))
            .write(&report)
            .await
    }

    /// Pre-flight plus a single first-page fetch
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        config.preflight()?;
        let session = self.session()?;

        info!(user_id = session.user_id(), "Checking session");

        let source = Self::paginator(&config)?;
        let page = source
            .next_page(&session, &PageCursor::Start)
            .await
            .map_err(|failure| Error::Other(format!("First page fetch failed: {failure}")))?;

        println!(
            "{}",
            json!({
                "status": "SUCCEEDED",
                "user_id": session.user_id(),
                "total_following": page.total_count,
                "first_page_records": page.records.len(),
            })
        );
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}

/// Pick the session cookie from, in order, the inline flag, the cookie
/// file, and the environment
pub fn resolve_session(
    cookie: Option<&str>,
    cookie_file: Option<&Path>,
    env_cookie: Option<&str>,
) -> Result<Session> {
    if let Some(header) = cookie {
        return Session::from_cookie_header(header);
    }

    if let Some(path) = cookie_file {
        let header = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cookie file {}", path.display()))?;
        return Session::from_cookie_header(header.trim());
    }

    match env_cookie {
        Some(header) if !header.trim().is_empty() => Session::from_cookie_header(header),
        _ => Err(Error::not_logged_in(format!(
            "no session cookie; pass --cookie, --cookie-file or set {COOKIE_ENV_VAR}"
        ))),
    }
}
