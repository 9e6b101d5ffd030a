//! Session credentials and request decoration

use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::fmt;

/// Environment variable consulted for the cookie header when no flag is given
pub const COOKIE_ENV_VAR: &str = "FOLLOWBACK_AUDIT_COOKIE";

const CSRF_COOKIE: &str = "csrftoken";
const USER_ID_COOKIE: &str = "ds_user_id";

/// Authenticated session for the audited account
///
/// Immutable for the whole run.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    csrf_token: String,
    cookie_header: Option<String>,
}

impl Session {
    /// Create a session from its parts, rejecting empty values
    pub fn new(user_id: impl Into<String>, csrf_token: impl Into<String>) -> Result<Self> {
        let user_id = user_id.into();
        let csrf_token = csrf_token.into();

        if csrf_token.trim().is_empty() {
            return Err(Error::not_logged_in(format!("missing {CSRF_COOKIE}")));
        }
        if user_id.trim().is_empty() {
            return Err(Error::not_logged_in(format!("missing {USER_ID_COOKIE}")));
        }

        Ok(Self {
            user_id,
            csrf_token,
            cookie_header: None,
        })
    }

    /// Parse a browser `Cookie` header (`name=value; name2=value2`)
    ///
    /// The header is kept and replayed on every request so that the
    /// server-side session cookie travels along with the extracted values.
    pub fn from_cookie_header(header: &str) -> Result<Self> {
        let csrf = cookie_value(header, CSRF_COOKIE)
            .ok_or_else(|| Error::not_logged_in(format!("cookie {CSRF_COOKIE} not found")))?;
        let user_id = cookie_value(header, USER_ID_COOKIE)
            .ok_or_else(|| Error::not_logged_in(format!("cookie {USER_ID_COOKIE} not found")))?;

        let mut session = Self::new(user_id, csrf)?;
        session.cookie_header = Some(header.trim().to_string());
        Ok(session)
    }

    /// Account id of the session owner
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Anti-forgery token
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Raw cookie header, if the session was parsed from one
    pub fn cookie_header(&self) -> Option<&str> {
        self.cookie_header.as_deref()
    }

    /// Attach the session headers to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header("X-CSRFToken", self.csrf_token.as_str())
            .header("X-Requested-With", "XMLHttpRequest");

        match &self.cookie_header {
            Some(cookie) => req.header(reqwest::header::COOKIE, cookie.as_str()),
            None => req,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("csrf_token", &"<redacted>")
            .field("has_cookie_header", &self.cookie_header.is_some())
            .finish()
    }
}

/// Find a cookie value by name; empty values count as absent
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
