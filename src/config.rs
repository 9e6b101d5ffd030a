//! Configuration types for an audit run
//!
//! All settings load from a YAML file in which every field is optional.
//! Missing fields take the defaults below.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_QUERY_HASH};
use crate::throttle::{RetryPolicy, ThrottleConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete audit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Remote endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Delay and rest cadence
    #[serde(default)]
    pub throttle: ThrottleSettings,

    /// Failure recovery
    #[serde(default)]
    pub retry: RetrySettings,

    /// Report destination
    #[serde(default)]
    pub output: OutputSettings,
}

impl AuditConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document means all defaults
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.api.page_size == 0 {
            return Err(Error::invalid_value("api.page_size", "must be greater than 0"));
        }
        if self.api.query_hash.trim().is_empty() {
            return Err(Error::invalid_value("api.query_hash", "must not be empty"));
        }
        if self.api.timeout_seconds == 0 {
            return Err(Error::invalid_value("api.timeout_seconds", "must be greater than 0"));
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| Error::invalid_value("api.base_url", e.to_string()))?;

        let t = &self.throttle;
        if t.min_delay_ms > t.max_delay_ms {
            return Err(Error::invalid_value(
                "throttle.min_delay_ms",
                "must not exceed max_delay_ms",
            ));
        }
        if t.long_rest_min_ms > t.long_rest_max_ms {
            return Err(Error::invalid_value(
                "throttle.long_rest_min_ms",
                "must not exceed long_rest_max_ms",
            ));
        }
        if t.profiles_before_long_rest == 0 {
            return Err(Error::invalid_value(
                "throttle.profiles_before_long_rest",
                "must be greater than 0",
            ));
        }

        if self.retry.max_attempts == Some(0) {
            return Err(Error::invalid_value(
                "retry.max_attempts",
                "must be greater than 0 or omitted for unbounded retries",
            ));
        }

        if self.output.path.is_empty() {
            return Err(Error::invalid_value("output.path", "must not be empty"));
        }

        Ok(())
    }

    /// Check the base URL before any request is sent
    ///
    /// The URL must be http(s) and its host must be one of `allowed_hosts`
    /// or a subdomain of one. An empty list skips the host check.
    pub fn preflight(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::WrongDomain {
                host: self.api.base_url.clone(),
                allowed: "http(s) URLs".to_string(),
            });
        }

        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        let allowed = &self.api.allowed_hosts;
        if allowed.is_empty() || allowed.iter().any(|h| host_matches(&host, h)) {
            return Ok(());
        }

        Err(Error::WrongDomain {
            host,
            allowed: allowed.join(", "),
        })
    }

    /// Throttle settings as durations
    pub fn throttle_config(&self) -> ThrottleConfig {
        let t = &self.throttle;
        ThrottleConfig {
            min_delay: Duration::from_millis(t.min_delay_ms),
            max_delay: Duration::from_millis(t.max_delay_ms),
            profiles_before_long_rest: t.profiles_before_long_rest,
            long_rest_min: Duration::from_millis(t.long_rest_min_ms),
            long_rest_max: Duration::from_millis(t.long_rest_max_ms),
        }
    }

    /// Retry settings as a policy
    pub fn retry_policy(&self) -> RetryPolicy {
        let r = &self.retry;
        RetryPolicy {
            max_attempts: r.max_attempts,
            rate_limit_cooldown: Duration::from_millis(r.rate_limit_cooldown_ms),
            malformed_delay: Duration::from_millis(r.malformed_retry_ms),
            transient_delay: Duration::from_millis(r.transient_retry_ms),
        }
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let api = &self.api;
        let builder = HttpClientConfig::builder()
            .base_url(api.base_url.trim_end_matches('/'))
            .timeout(Duration::from_secs(api.timeout_seconds))
            .user_agent(api.user_agent.clone());

        match RateLimiterConfig::from_rps(api.requests_per_second) {
            Some(limit) => builder.rate_limit(limit),
            None => builder.no_rate_limit(),
        }
        .build()
    }
}

fn host_matches(host: &str, allowed: &str) -> bool {
    let allowed = allowed.trim_start_matches('.').to_ascii_lowercase();
    host == allowed || host.ends_with(&format!(".{allowed}"))
}

// ============================================================================
// API
// ============================================================================

/// Remote endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Site origin the session belongs to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identifier of the following-list query
    #[serde(default = "default_query_hash")]
    pub query_hash: String,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Global request ceiling; 0 disables it
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Hosts the base URL may point at
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            query_hash: default_query_hash(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout(),
            requests_per_second: default_rps(),
            allowed_hosts: default_allowed_hosts(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.instagram.com".to_string()
}

fn default_query_hash() -> String {
    DEFAULT_QUERY_HASH.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout() -> u64 {
    30
}

fn default_rps() -> u32 {
    1
}

fn default_allowed_hosts() -> Vec<String> {
    vec!["instagram.com".to_string()]
}

fn default_user_agent() -> String {
    format!("followback-audit/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Throttle
// ============================================================================

/// Delay and rest cadence, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleSettings {
    /// Lower bound of the per-page delay
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    /// Upper bound of the per-page delay
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Profiles processed between extended rests
    #[serde(default = "default_profiles_before_rest")]
    pub profiles_before_long_rest: u64,

    /// Lower bound of an extended rest
    #[serde(default = "default_long_rest_min")]
    pub long_rest_min_ms: u64,

    /// Upper bound of an extended rest
    #[serde(default = "default_long_rest_max")]
    pub long_rest_max_ms: u64,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
            profiles_before_long_rest: default_profiles_before_rest(),
            long_rest_min_ms: default_long_rest_min(),
            long_rest_max_ms: default_long_rest_max(),
        }
    }
}

fn default_min_delay() -> u64 {
    2000
}

fn default_max_delay() -> u64 {
    6000
}

fn default_profiles_before_rest() -> u64 {
    45
}

fn default_long_rest_min() -> u64 {
    30000
}

fn default_long_rest_max() -> u64 {
    60000
}

// ============================================================================
// Retry
// ============================================================================

/// Failure recovery, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Consecutive failures tolerated per cursor; unbounded when absent
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Cooldown after HTTP 429
    #[serde(default = "default_rate_limit_cooldown")]
    pub rate_limit_cooldown_ms: u64,

    /// Wait after a malformed response
    #[serde(default = "default_malformed_retry")]
    pub malformed_retry_ms: u64,

    /// Wait after any other failure
    #[serde(default = "default_transient_retry")]
    pub transient_retry_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: None,
            rate_limit_cooldown_ms: default_rate_limit_cooldown(),
            malformed_retry_ms: default_malformed_retry(),
            transient_retry_ms: default_transient_retry(),
        }
    }
}

fn default_rate_limit_cooldown() -> u64 {
    120_000
}

fn default_malformed_retry() -> u64 {
    5000
}

fn default_transient_retry() -> u64 {
    10000
}

// ============================================================================
// Output
// ============================================================================

/// Report destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// File path, or `-` for stdout
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    crate::output::DEFAULT_OUTPUT_PATH.to_string()
}
