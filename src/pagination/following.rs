//! GraphQL "following" page source
//!
//! Pages through `data.user.edge_follow` of the persisted GraphQL query
//! identified by `query_hash`.

use super::types::{Page, PageCursor, PageFailure, PageSource, RelationshipRecord};
use crate::error::Error;
use crate::http::{HttpClient, RequestConfig};
use crate::session::Session;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Default persisted query for the following connection
pub const DEFAULT_QUERY_HASH: &str = "3dec7e2c57367ef3da3d987d89f9dbc8";

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 24;

const QUERY_PATH: &str = "/graphql/query/";
const UNKNOWN_USERNAME: &str = "unknown";

/// Query variables, serialized as JSON into the `variables` parameter
#[derive(Debug, Serialize)]
struct QueryVariables<'a> {
    id: &'a str,
    include_reel: bool,
    fetch_mutual: bool,
    first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

/// Cursor-paginated source for the accounts a user follows
#[derive(Debug, Clone)]
pub struct FollowingPaginator {
    client: HttpClient,
    query_hash: String,
    page_size: u32,
}

impl FollowingPaginator {
    /// Create a paginator with the default query hash and page size
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            query_hash: DEFAULT_QUERY_HASH.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the persisted query hash
    #[must_use]
    pub fn with_query_hash(mut self, query_hash: impl Into<String>) -> Self {
        self.query_hash = query_hash.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page size requested from the endpoint
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build the query parameters for a page request
    pub fn request_config(
        &self,
        user_id: &str,
        cursor: &PageCursor,
    ) -> Result<RequestConfig, serde_json::Error> {
        let variables = QueryVariables {
            id: user_id,
            include_reel: true,
            fetch_mutual: true,
            first: self.page_size,
            after: cursor.token(),
        };

        Ok(RequestConfig::new()
            .query("query_hash", &self.query_hash)
            .query("variables", serde_json::to_string(&variables)?))
    }
}

#[async_trait]
impl PageSource for FollowingPaginator {
    async fn next_page(
        &self,
        session: &Session,
        cursor: &PageCursor,
    ) -> Result<Page, PageFailure> {
        let config = self
            .request_config(session.user_id(), cursor)
            .map_err(|e| PageFailure::transient(e.to_string()))?;

        debug!(cursor = %cursor, "Requesting following page");

        let body = self
            .client
            .get_json(QUERY_PATH, config, session)
            .await
            .map_err(classify_error)?;

        parse_page(&body)
    }
}

/// Map a client error onto the recoverable failure taxonomy
fn classify_error(err: Error) -> PageFailure {
    match err {
        Error::RateLimited => PageFailure::RateLimited,
        other => PageFailure::transient(other.to_string()),
    }
}

/// Parse a GraphQL response body into a page
///
/// Only a missing `data.user.edge_follow` is malformed; everything below it
/// is defaulted.
pub fn parse_page(body: &Value) -> Result<Page, PageFailure> {
    let follow = body
        .get("data")
        .and_then(|d| d.get("user"))
        .and_then(|u| u.get("edge_follow"))
        .filter(|f| f.is_object())
        .ok_or_else(|| PageFailure::malformed("data.user.edge_follow missing"))?;

    let records = follow
        .get("edges")
        .and_then(Value::as_array)
        .map(|edges| {
            edges
                .iter()
                .map(|edge| extract_record(edge.get("node").unwrap_or(&Value::Null)))
                .collect()
        })
        .unwrap_or_default();

    let page_info = follow.get("page_info");
    let has_next = page_info
        .and_then(|p| p.get("has_next_page"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let next_cursor = page_info
        .and_then(|p| p.get("end_cursor"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(PageCursor::after);

    Ok(Page {
        total_count: follow.get("count").and_then(Value::as_u64),
        records,
        has_next,
        next_cursor,
    })
}

/// Extract a record from a connection node, defaulting every missing field
pub fn extract_record(node: &Value) -> RelationshipRecord {
    let text = |key: &str| node.get(key).and_then(Value::as_str).map(str::to_string);
    let flag = |key: &str| node.get(key).and_then(Value::as_bool).unwrap_or(false);
    let edge_count = |key: &str| {
        node.get(key)
            .and_then(|e| e.get("count"))
            .and_then(Value::as_u64)
    };

    let id = match node.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    RelationshipRecord {
        id,
        username: text("username")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
        full_name: text("full_name").unwrap_or_default(),
        profile_pic_url: text("profile_pic_url").unwrap_or_default(),
        follower_count: edge_count("edge_followed_by"),
        mutual_followers_count: edge_count("edge_mutual_followed_by").unwrap_or(0),
        is_verified: flag("is_verified"),
        is_private: flag("is_private"),
        follows_viewer: flag("follows_viewer"),
    }
}
