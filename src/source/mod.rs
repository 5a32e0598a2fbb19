//! Feed sources: fetching, proxying and parsing.
//!
//! This module defines the [`Fetcher`] trait (the network collaborator), the
//! shared data types and the RSS parser.  Concrete pieces live in
//! sub-modules:
//!
//! * [`http`]: the real [`Fetcher`], going through the proxy with `reqwest`.
//! * [`proxy`]: builds proxied URLs.
//! * [`rss`]: turns raw text into a [`FeedDocument`].
//! * [`post`]: `Feed`, `Post` and friends.
//!
//! ## For contributors: adding a new transport
//!
//! Implement [`Fetcher`] for your type and hand it to `App::new` in
//! `main.rs`.  Both the ingestion flow and the refresh loop only ever see the
//! trait, so nothing else changes.

mod http;
mod post;
mod proxy;
mod rss;

pub use http::HttpFetcher;
pub use post::{Feed, FeedDocument, FeedId, ParsedPost, Post, PostId};
pub use proxy::{Proxy, DEFAULT_PROXY};
pub use self::rss::{parse, ParsingError};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Longest a single fetch may take before it counts as a network failure.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failure: the document could not be retrieved at all.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("proxy returned no contents")]
    EmptyResponse,
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Why fetching and parsing one feed failed.
///
/// Callers use the variant to pick the user-facing message: a network
/// problem and "there is no feed at this address" are reported differently.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Network(#[from] FetchError),
    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl LoadError {
    pub fn is_parsing(&self) -> bool {
        matches!(self, LoadError::Parsing(_))
    }
}

/// The network collaborator.
///
/// `url` is always an already-proxied URL; implementations return the raw
/// document text.  Used from spawned tasks, so implementations must be
/// [`Send`] + [`Sync`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetch `url` and parse the result as a feed document.
///
/// A fetch still pending after [`FETCH_TIMEOUT`] is abandoned and reported as
/// [`FetchError::Timeout`], whatever the [`Fetcher`] does internally.
pub async fn load(fetcher: &dyn Fetcher, url: &str) -> Result<FeedDocument, LoadError> {
    let raw = tokio::time::timeout(FETCH_TIMEOUT, fetcher.fetch(url))
        .await
        .map_err(|_| FetchError::Timeout(FETCH_TIMEOUT))??;
    Ok(parse(&raw)?)
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn load_parses_fetched_document() {
        let fetcher = StubFetcher::new();
        fetcher.respond("u", FEED_V1);

        let doc = load(&fetcher, "u").await.unwrap();
        assert_eq!(doc.title, "Lessons");
        assert_eq!(doc.posts.len(), 2);
    }

    #[tokio::test]
    async fn load_classifies_bad_content_as_parsing() {
        let fetcher = StubFetcher::new();
        fetcher.respond("u", NOT_A_FEED);

        let err = load(&fetcher, "u").await.unwrap_err();
        assert!(err.is_parsing());
    }

    #[tokio::test]
    async fn load_classifies_transport_failure_as_network() {
        let fetcher = StubFetcher::new();
        fetcher.fail("u");

        let err = load(&fetcher, "u").await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn load_gives_up_on_a_silent_server() {
        let fetcher = StubFetcher::new();
        fetcher.hang("u").respond("u", FEED_V1);

        let started = tokio::time::Instant::now();
        let err = load(&fetcher, "u").await.unwrap_err();
        assert!(matches!(err, LoadError::Network(FetchError::Timeout(_))));
        assert!(!err.is_parsing());
        assert!(started.elapsed() >= FETCH_TIMEOUT);

        assert!(load(&fetcher, "u").await.is_ok(), "next attempt is unaffected");
    }

    #[tokio::test]
    async fn stub_replays_queue_then_repeats_last() {
        let fetcher = StubFetcher::new();
        fetcher.fail("u").respond("u", FEED_V1);

        assert!(fetcher.fetch("u").await.is_err());
        assert!(fetcher.fetch("u").await.is_ok());
        assert!(fetcher.fetch("u").await.is_ok());
        assert_eq!(fetcher.calls(), 3);
    }
}
