//! HTTP client module
//!
//! Provides a single-attempt HTTP client that classifies responses for the
//! audit loop, which owns every retry decision.
//!
//! # Features
//!
//! - **Session decoration**: anti-forgery and cookie headers on each request
//! - **Request ceiling**: optional token bucket rate limiter using governor
//! - **Failure classification**: 429, other statuses, timeouts, transport

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
