//! CORS-proxy URL construction.
//!
//! Feeds are never fetched directly: every request goes through an
//! allorigins-style proxy which answers `GET <base>/get?url=<feed>` with
//! `{"contents": "<raw document>"}`.

use reqwest::Url;

/// Default proxy endpoint.
pub const DEFAULT_PROXY: &str = "https://allorigins.hexlet.app/";

/// A proxy endpoint that feed URLs are wrapped in before fetching.
#[derive(Debug, Clone)]
pub struct Proxy {
    base: Url,
}

impl Proxy {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Build the proxied URL for `feed_url`.
    ///
    /// The feed URL is percent-encoded into the `url` query parameter, and
    /// `disableCache=true` asks the proxy to bypass its own cache so refreshes
    /// see new items.
    pub fn wrap(&self, feed_url: &str) -> String {
        let mut url = self.base.join("get").unwrap_or_else(|_| self.base.clone());
        url.query_pairs_mut()
            .append_pair("disableCache", "true")
            .append_pair("url", feed_url);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_appends_get_and_encodes_feed_url() {
        let proxy = Proxy::new(Url::parse("https://proxy.example/").unwrap());
        let wrapped = proxy.wrap("https://ru.hexlet.io/lessons.rss?x=1&y=2");

        assert_eq!(
            wrapped,
            "https://proxy.example/get?disableCache=true&url=https%3A%2F%2Fru.hexlet.io%2Flessons.rss%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn wrap_round_trips_through_query_parsing() {
        let proxy = Proxy::new(Url::parse(DEFAULT_PROXY).unwrap());
        let wrapped = Url::parse(&proxy.wrap("https://example.com/feed.xml")).unwrap();

        let url_param = wrapped
            .query_pairs()
            .find(|(k, _)| k == "url")
            .map(|(_, v)| v.into_owned());
        assert_eq!(url_param.as_deref(), Some("https://example.com/feed.xml"));
        assert_eq!(wrapped.path(), "/get");
    }
}
