//! Tests for the session module

use super::*;
use crate::error::Error;

#[test]
fn test_session_new() {
    let session = Session::new("12345", "tok").unwrap();
    assert_eq!(session.user_id(), "12345");
    assert_eq!(session.csrf_token(), "tok");
    assert!(session.cookie_header().is_none());
}

#[test]
fn test_session_new_rejects_empty_token() {
    let err = Session::new("12345", "  ").unwrap_err();
    assert!(matches!(err, Error::NotLoggedIn { .. }));
    assert!(err.to_string().contains("csrftoken"));
}

#[test]
fn test_session_new_rejects_empty_user_id() {
    let err = Session::new("", "tok").unwrap_err();
    assert!(err.to_string().contains("ds_user_id"));
}

#[test]
fn test_from_cookie_header() {
    let header = "mid=abc; csrftoken=tok123; ds_user_id=42; sessionid=s%3Axyz";
    let session = Session::from_cookie_header(header).unwrap();

    assert_eq!(session.user_id(), "42");
    assert_eq!(session.csrf_token(), "tok123");
    assert_eq!(session.cookie_header(), Some(header));
}

#[test]
fn test_from_cookie_header_tolerates_spacing() {
    let session = Session::from_cookie_header("  ds_user_id = 7 ;csrftoken=t  ").unwrap();
    assert_eq!(session.user_id(), "7");
    assert_eq!(session.csrf_token(), "t");
}

#[test]
fn test_from_cookie_header_missing_token() {
    let err = Session::from_cookie_header("ds_user_id=42; sessionid=x").unwrap_err();
    assert!(err.is_preflight());
    assert!(err.to_string().contains("csrftoken"));
}

#[test]
fn test_from_cookie_header_missing_user_id() {
    let err = Session::from_cookie_header("csrftoken=tok").unwrap_err();
    assert!(err.to_string().contains("ds_user_id"));
}

#[test]
fn test_from_cookie_header_empty_value_is_missing() {
    assert!(Session::from_cookie_header("csrftoken=; ds_user_id=42").is_err());
}

#[test]
fn test_similar_cookie_names_do_not_match() {
    let err = Session::from_cookie_header("xcsrftoken=tok; ds_user_id=42").unwrap_err();
    assert!(matches!(err, Error::NotLoggedIn { .. }));
}

#[test]
fn test_debug_redacts_token() {
    let session = Session::new("42", "super-secret").unwrap();
    let debug = format!("{session:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_apply_headers() {
    let session = Session::from_cookie_header("csrftoken=tok; ds_user_id=42").unwrap();
    let client = reqwest::Client::new();
    let req = session.apply(client.get("https://example.com/graphql/query/"));

    let built = req.build().unwrap();
    assert_eq!(built.headers().get("X-CSRFToken").unwrap(), "tok");
    assert_eq!(
        built.headers().get("X-Requested-With").unwrap(),
        "XMLHttpRequest"
    );
    assert_eq!(
        built.headers().get("Cookie").unwrap(),
        "csrftoken=tok; ds_user_id=42"
    );
}

#[test]
fn test_apply_without_cookie_header() {
    let session = Session::new("42", "tok").unwrap();
    let client = reqwest::Client::new();
    let built = session
        .apply(client.get("https://example.com/"))
        .build()
        .unwrap();

    assert_eq!(built.headers().get("X-CSRFToken").unwrap(), "tok");
    assert!(built.headers().get("Cookie").is_none());
}
