//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::session::Session;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session() -> Session {
    Session::from_cookie_header("csrftoken=tok; ds_user_id=42").unwrap()
}

async fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("followback-audit/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(2, 1))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 1)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("query_hash", "abc")
        .query("variables", "{}")
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query.get("query_hash"), Some(&"abc".to_string()));
    assert_eq!(config.query.get("variables"), Some(&"{}".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_get_json_sends_session_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql/query/"))
        .and(query_param("query_hash", "abc"))
        .and(header("X-CSRFToken", "tok"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("Cookie", "csrftoken=tok; ds_user_id=42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let data = client
        .get_json(
            "/graphql/query/",
            RequestConfig::new().query("query_hash", "abc"),
            &session(),
        )
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-IG-App-ID", "936619743392459"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-IG-App-ID", "936619743392459")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client
        .get_json("/", RequestConfig::new(), &session())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_429_is_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .get_json("/graphql/query/", RequestConfig::new(), &session())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RateLimited));
}

#[tokio::test]
async fn test_server_error_is_http_status_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .get_json("/", RequestConfig::new(), &session())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .get_json("/", RequestConfig::new(), &session())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .get_json(
            "/",
            RequestConfig::new().timeout(Duration::from_millis(50)),
            &session(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .get_json("/", RequestConfig::new(), &session())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[test]
fn test_has_rate_limiter() {
    let client = HttpClient::new().unwrap();
    assert!(client.has_rate_limiter());

    let client =
        HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap();
    assert!(!client.has_rate_limiter());
}
