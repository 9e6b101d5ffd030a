//! Pagination module
//!
//! Cursor-based paging over the "following" connection.
//!
//! # Overview
//!
//! A [`PageSource`] turns a session and a [`PageCursor`] into either a
//! [`Page`] or a recoverable [`PageFailure`]. The loop in
//! [`crate::engine`] decides what to do with failures; the source never
//! retries on its own.

mod following;
mod types;

pub use following::{
    extract_record, parse_page, FollowingPaginator, DEFAULT_PAGE_SIZE, DEFAULT_QUERY_HASH,
};
pub use types::{Page, PageCursor, PageFailure, PageSource, RelationshipRecord};
