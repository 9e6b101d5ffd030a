//! Error types for followback-audit
//!
//! This module defines the hard-stop error hierarchy for the crate.
//! Recoverable page failures live in [`crate::pagination::PageFailure`] and
//! only surface here once a retry cap is exhausted.

use crate::pagination::PageFailure;
use thiserror::Error;

/// The main error type for followback-audit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Pre-flight Errors
    // ============================================================================
    #[error("Not logged in: {message}")]
    NotLoggedIn { message: String },

    #[error("Wrong domain: {host} is not one of [{allowed}]")]
    WrongDomain { host: String, allowed: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited (HTTP 429)")]
    RateLimited,

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Audit Loop Errors
    // ============================================================================
    #[error("Max retries ({max_attempts}) exceeded, last failure: {last}")]
    MaxRetriesExceeded { max_attempts: u32, last: PageFailure },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-logged-in error
    pub fn not_logged_in(message: impl Into<String>) -> Self {
        Self::NotLoggedIn {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Check if this error is a pre-flight failure (raised before the loop starts)
    pub fn is_preflight(&self) -> bool {
        matches!(self, Error::NotLoggedIn { .. } | Error::WrongDomain { .. })
    }
}

/// Result type alias for followback-audit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_value("page_size", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'page_size': must be greater than 0"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_max_retries_display_includes_last_failure() {
        let err = Error::MaxRetriesExceeded {
            max_attempts: 3,
            last: PageFailure::RateLimited,
        };
        let text = err.to_string();
        assert!(text.contains("Max retries (3)"));
        assert!(text.contains("rate limited"));
    }

    #[test]
    fn test_is_preflight() {
        assert!(Error::not_logged_in("missing ds_user_id").is_preflight());
        assert!(Error::WrongDomain {
            host: "example.com".into(),
            allowed: "instagram.com".into()
        }
        .is_preflight());
        assert!(!Error::output("disk full").is_preflight());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
