//! RSS document parsing.
//!
//! [`parse`] turns raw feed text into a [`FeedDocument`] using the [`rss`]
//! crate.  It is a pure function (no I/O) so that the ingestion flow, the
//! refresh loop and the tests all share exactly the same interpretation of a
//! document.
//!
//! A document that cannot be read as RSS fails with [`ParsingError`].  That is
//! a *content* failure; transport failures are reported separately as
//! [`super::FetchError`] so callers can tell "no feed here" from "network
//! down".

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{FeedDocument, ParsedPost};

/// The fetched text is not a readable feed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid feed document: {message}")]
pub struct ParsingError {
    message: String,
}

impl ParsingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Diagnostic from the underlying XML/RSS reader.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Parse a raw feed document.
///
/// Extracts the channel title and description and, for every `<item>`, its
/// title, link and description in document order.  Missing item fields become
/// empty strings; an item without `<link>` uses its `<guid>` as the link.
pub fn parse(raw: &str) -> Result<FeedDocument, ParsingError> {
    let channel =
        rss::Channel::read_from(raw.as_bytes()).map_err(|e| ParsingError::new(e.to_string()))?;

    let posts = channel
        .items()
        .iter()
        .map(|item| {
            let link = item
                .link()
                .map(String::from)
                .or_else(|| item.guid().map(|g| g.value().to_string()))
                .unwrap_or_default();

            // Unparseable dates are dropped, not fatal.
            let published = item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                .map(|dt| dt.with_timezone(&Utc));

            ParsedPost {
                title: item.title().unwrap_or_default().to_string(),
                link,
                description: item.description().unwrap_or_default().to_string(),
                published,
            }
        })
        .collect();

    Ok(FeedDocument {
        title: channel.title().to_string(),
        description: channel.description().to_string(),
        posts,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::{FEED_V1, NOT_A_FEED};

    #[test]
    fn parse_extracts_channel_and_items() {
        let doc = parse(FEED_V1).unwrap();

        assert_eq!(doc.title, "Lessons");
        assert_eq!(doc.description, "Practical programming lessons");
        assert_eq!(doc.posts.len(), 2);

        assert_eq!(doc.posts[0].title, "Filtering");
        assert_eq!(doc.posts[0].link, "https://example.com/lessons/1");
        assert_eq!(doc.posts[0].description, "Learn to filter data");
        assert!(doc.posts[0].published.is_some());

        assert_eq!(doc.posts[1].title, "Open API");
        assert_eq!(doc.posts[1].link, "https://example.com/lessons/2");
    }

    #[test]
    fn parse_preserves_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Order</title>
    <description>d</description>
    <item><title>c</title><link>https://e.com/c</link></item>
    <item><title>a</title><link>https://e.com/a</link></item>
    <item><title>b</title><link>https://e.com/b</link></item>
  </channel>
</rss>"#;

        let titles: Vec<String> = parse(xml).unwrap().posts.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn html_page_is_a_parsing_error() {
        let err = parse(NOT_A_FEED).unwrap_err();
        assert!(!err.message().is_empty());
    }

    #[test]
    fn truncated_document_is_a_parsing_error() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Oops"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn empty_input_is_a_parsing_error() {
        assert!(parse("").is_err());
    }

    #[test]
    fn parse_is_deterministic() {
        assert_eq!(parse(FEED_V1), parse(FEED_V1));
        assert_eq!(parse(NOT_A_FEED), parse(NOT_A_FEED));
    }

    #[test]
    fn falls_back_to_guid_when_no_link() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <title>No link</title>
      <guid>https://example.com/by-guid</guid>
    </item>
  </channel>
</rss>"#;

        let doc = parse(xml).unwrap();
        assert_eq!(doc.posts[0].link, "https://example.com/by-guid");
    }

    #[test]
    fn missing_fields_become_empty() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <link>https://example.com/bare</link>
      <pubDate>not-a-real-date</pubDate>
    </item>
  </channel>
</rss>"#;

        let doc = parse(xml).unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.posts[0].title, "");
        assert_eq!(doc.posts[0].description, "");
        assert!(doc.posts[0].published.is_none());
    }

    #[test]
    fn channel_without_items_has_no_posts() {
        let xml = r#"<rss version="2.0"><channel><title>Empty</title><description>none yet</description></channel></rss>"#;
        let doc = parse(xml).unwrap();
        assert_eq!(doc.title, "Empty");
        assert!(doc.posts.is_empty());
    }
}
