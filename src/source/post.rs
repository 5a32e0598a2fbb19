//! The data types shared by the parser, the state store and the renderers.
//!
//! A [`FeedDocument`] is what the parser produces from one fetch.  Once a
//! document is accepted into application state its items become [`Post`]s,
//! each tagged with the feed it came from and a fresh [`PostId`].
//!
//! ## Identity
//!
//! Two different keys identify a post and they must not be confused:
//!
//! * `link` is the natural identity.  De-duplication across refreshes and
//!   across feeds is always done on `link`.
//! * `post_id` is a per-insertion token, only used to address a post from the
//!   UI (preview modal, seen set).  It is never compared to decide whether a
//!   post is "new".

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// Canonical source URL of a feed.  Unique across all tracked feeds.
pub type FeedId = String;

/// Process-unique token assigned to a post when it enters the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(u64);

static NEXT_POST_ID: AtomicU64 = AtomicU64::new(1);

impl PostId {
    /// Allocate a token that has never been handed out before in this process.
    pub fn next() -> Self {
        Self(NEXT_POST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post-{}", self.0)
    }
}

/// A tracked feed.  Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: FeedId,
    pub title: String,
    pub description: String,
}

/// One item as it appears in a parsed document, before it has an identity
/// in application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Only used for display; the post list is ordered by insertion.
    pub published: Option<DateTime<Utc>>,
}

/// Structured result of parsing a feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    /// Items in document order.
    pub posts: Vec<ParsedPost>,
}

/// A post in the live post list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    pub feed_id: FeedId,
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: Option<DateTime<Utc>>,
}

impl Post {
    /// Promote a parsed item into a post owned by `feed_id`, allocating a new
    /// [`PostId`].
    pub fn from_parsed(feed_id: &str, parsed: &ParsedPost) -> Self {
        Self {
            post_id: PostId::next(),
            feed_id: feed_id.to_string(),
            title: parsed.title.clone(),
            link: parsed.link.clone(),
            description: parsed.description.clone(),
            published: parsed.published,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
