//! Pagination types and traits
//!
//! Defines the page contract shared by every page source and the loop.

use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Position in the remote paginated collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PageCursor {
    /// First page, no continuation token yet
    #[default]
    Start,
    /// Continuation token returned by the previous page
    After(String),
}

impl PageCursor {
    /// Cursor for a token returned by the server; empty tokens mean "start"
    pub fn after(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            Self::Start
        } else {
            Self::After(token)
        }
    }

    /// The continuation token, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Start => None,
            Self::After(token) => Some(token),
        }
    }

    /// Check if this is the first-page sentinel
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start)
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("<start>"),
            Self::After(token) => f.write_str(token),
        }
    }
}

/// One followed account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    /// Account id
    pub id: Option<String>,
    /// Username, `"unknown"` when absent
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Avatar URL
    pub profile_pic_url: String,
    /// Follower count, when reported
    pub follower_count: Option<u64>,
    /// Followers shared with the session owner
    pub mutual_followers_count: u64,
    /// Verified badge
    pub is_verified: bool,
    /// Private account
    pub is_private: bool,
    /// Whether this account follows the session owner back
    #[serde(default, skip_serializing)]
    pub follows_viewer: bool,
}

impl RelationshipRecord {
    /// Check if the follow is reciprocated
    pub fn is_reciprocated(&self) -> bool {
        self.follows_viewer
    }
}

/// A successfully parsed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Total size of the collection as reported by this page
    pub total_count: Option<u64>,
    /// Records on this page, in server order
    pub records: Vec<RelationshipRecord>,
    /// Whether more pages follow
    pub has_next: bool,
    /// Cursor for the following page
    pub next_cursor: Option<PageCursor>,
}

impl Page {
    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        !self.has_next
    }
}

/// Recoverable failure signals returned instead of a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageFailure {
    /// The endpoint signalled throttling (HTTP 429)
    #[error("rate limited by the endpoint")]
    RateLimited,

    /// The response lacked the expected connection structure
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// What was missing
        reason: String,
    },

    /// Any other transport or status failure
    #[error("transient error: {message}")]
    Transient {
        /// Underlying error text
        message: String,
    },
}

impl PageFailure {
    /// Create a malformed response signal
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a transient error signal
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }
}

/// Core trait for page sources
///
/// `cursor` is either [`PageCursor::Start`] or a cursor previously returned
/// by the same source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page
    async fn next_page(
        &self,
        session: &Session,
        cursor: &PageCursor,
    ) -> Result<Page, PageFailure>;
}
