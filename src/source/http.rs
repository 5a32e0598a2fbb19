//! HTTP fetcher for proxied feed URLs.

use async_trait::async_trait;
use serde::Deserialize;

use super::{FetchError, Fetcher, FETCH_TIMEOUT};

/// Body returned by the proxy.  `contents` is `null` when the proxy itself
/// could not reach the feed.
#[derive(Debug, Deserialize)]
struct ProxyResponse {
    contents: Option<String>,
}

/// Fetches documents through the proxy over HTTP with [`reqwest`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client whose requests give up after [`FETCH_TIMEOUT`].
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response: ProxyResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.contents.ok_or(FetchError::EmptyResponse)
    }
}
