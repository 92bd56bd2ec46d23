//! Google News RSS search client.
//!
//! Google News exposes keyword search as an RSS 2.0 feed. The rolling one-day
//! window is expressed in the query itself (`when:1d`) and language/region are
//! pinned to US English.
//!
//! # Item Shape
//!
//! ```xml
//! <item>
//!   <title>Markets rally on rate hopes - Reuters</title>
//!   <link>https://news.google.com/rss/articles/...</link>
//!   <pubDate>Tue, 06 May 2025 10:00:00 GMT</pubDate>
//!   <description>...</description>
//!   <source url="https://www.reuters.com">Reuters</source>
//! </item>
//! ```
//!
//! # Article Links
//!
//! `<link>` points at a `news.google.com/rss/articles/<id>` redirect page, not
//! the publisher. For the classic id format the id is URL-safe base64 over a
//! small protobuf that embeds the publisher URL:
//!
//! ```text
//! 08 13 22 <varint len> <url bytes> [d2 01 00]
//! ```
//!
//! [`decode_article_url`] unwraps that; ids in other formats keep the Google link.

use crate::models::SearchQuery;
use crate::sources::{non_blank, NewsSource, SourceRecord, UNKNOWN_TIMESTAMP, UNTITLED};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://news.google.com";

const WINDOW: &str = "when:1d";
const FALLBACK_PUBLISHER: &str = "Google News";

/// Leading bytes of a classic article id payload.
const ARTICLE_ID_PREFIX: [u8; 3] = [0x08, 0x13, 0x22];

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<GoogleNewsEntry>,
}

/// One `<item>` of the search feed.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleNewsEntry {
    #[serde(default)]
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
    pub source: Option<GoogleNewsPublisher>,
    /// Publisher URL decoded from `link`, filled in by [`parse_feed`].
    #[serde(skip)]
    pub article_url: Option<String>,
}

/// The `<source url="...">Name</source>` element; only the name is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleNewsPublisher {
    #[serde(rename = "$text", default)]
    pub name: String,
}

impl SourceRecord for GoogleNewsEntry {
    fn publisher(&self) -> &str {
        self.source
            .as_ref()
            .map(|s| s.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_PUBLISHER)
    }

    fn title(&self) -> &str {
        non_blank(Some(self.title.as_str())).unwrap_or(UNTITLED)
    }

    fn published(&self) -> &str {
        non_blank(Some(self.pub_date.as_str())).unwrap_or(UNKNOWN_TIMESTAMP)
    }

    fn url(&self) -> &str {
        self.article_url.as_deref().unwrap_or(&self.link)
    }
}

/// Parse a Google News RSS document into its items, in feed order.
pub fn parse_feed(xml: &str) -> Result<Vec<GoogleNewsEntry>, Box<dyn Error>> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    let mut entries = rss.channel.items;
    for entry in &mut entries {
        entry.article_url = decode_article_url(&entry.link);
    }
    Ok(entries)
}

/// Recover the publisher URL embedded in a `news.google.com/rss/articles/<id>` link.
///
/// Returns `None` for links that aren't article redirects or whose id uses
/// an encoding other than the classic protobuf payload.
pub fn decode_article_url(link: &str) -> Option<String> {
    let id = link.split("/articles/").nth(1)?.split(['?', '#']).next()?;
    let bytes = URL_SAFE_NO_PAD.decode(id.trim_end_matches('=')).ok()?;
    let payload = bytes.strip_prefix(&ARTICLE_ID_PREFIX[..])?;
    let (len, rest) = read_varint(payload)?;
    let url = std::str::from_utf8(rest.get(..len)?).ok()?;

    if url.starts_with("http://") || url.starts_with("https://") {
        debug!(%link, %url, "Decoded Google News article link");
        Some(url.to_string())
    } else {
        None
    }
}

/// Read a protobuf base-128 varint, returning the value and the remaining bytes.
fn read_varint(bytes: &[u8]) -> Option<(usize, &[u8])> {
    let mut value = 0usize;
    for (i, byte) in bytes.iter().enumerate().take(4) {
        value |= ((byte & 0x7f) as usize) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, &bytes[i + 1..]));
        }
    }
    None
}

/// Client for the Google News RSS search endpoint.
#[derive(Debug, Clone)]
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
}

impl GoogleNewsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, topic: &str) -> String {
        format!(
            "{}/rss/search?q={}&hl=en-US&gl=US&ceid=US:en",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&format!("{topic} {WINDOW}"))
        )
    }
}

impl NewsSource for GoogleNewsClient {
    type Record = GoogleNewsEntry;

    fn label(&self) -> &'static str {
        "Google News"
    }

    #[instrument(level = "info", skip_all, fields(topic = %query.topic, max = query.max_results))]
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<GoogleNewsEntry>, Box<dyn Error>> {
        let url = self.search_url(&query.topic);
        debug!(%url, "Fetching Google News RSS");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}").into());
        }

        let body = response.text().await?;
        let mut entries = parse_feed(&body)?;
        entries.truncate(query.max_results as usize);

        info!(count = entries.len(), "Fetched Google News entries");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockito::Matcher;

    fn feed(count: usize) -> String {
        let items: String = (0..count)
            .map(|i| {
                format!(
                    r#"<item>
      <title>Story {i} - Outlet {i}</title>
      <link>https://news.google.com/rss/articles/story{i}</link>
      <guid isPermaLink="false">story{i}</guid>
      <pubDate>Tue, 06 May 2025 0{i}:00:00 GMT</pubDate>
      <description>&lt;a href="https://outlet{i}.example"&gt;Story {i}&lt;/a&gt;</description>
      <source url="https://outlet{i}.example">Outlet {i}</source>
    </item>
    "#
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"Global Economy when:1d" - Google News</title>
    <link>https://news.google.com/search?q=Global+Economy+when:1d</link>
    <language>en-US</language>
    <webMaster>news-webmaster@google.com</webMaster>
    <copyright>2025 Google LLC</copyright>
    <lastBuildDate>Tue, 06 May 2025 12:00:00 GMT</lastBuildDate>
    <description>Google News</description>
    {items}
  </channel>
</rss>"#
        )
    }

    #[test]
    fn test_parse_feed_reads_items_in_order() {
        let entries = parse_feed(&feed(3)).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title(), "Story 0 - Outlet 0");
        assert_eq!(entries[0].publisher(), "Outlet 0");
        assert_eq!(entries[0].published(), "Tue, 06 May 2025 00:00:00 GMT");
        assert_eq!(
            entries[2].url(),
            "https://news.google.com/rss/articles/story2"
        );
    }

    #[test]
    fn test_parse_feed_without_items() {
        let entries = parse_feed(&feed(0)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        assert!(parse_feed("<html><body>captcha</body></html>").is_err());
    }

    #[test]
    fn test_missing_publisher_falls_back() {
        let xml = r#"<rss><channel><item>
            <title>Untagged</title>
            <link>https://news.google.com/rss/articles/x</link>
            <pubDate>Tue, 06 May 2025 09:00:00 GMT</pubDate>
        </item></channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries[0].publisher(), "Google News");
    }

    #[test]
    fn test_blank_fields_fall_back() {
        let xml = r#"<rss><channel><item>
            <title></title>
            <link>https://news.google.com/rss/articles/x</link>
            <source url="https://outlet.example">Outlet</source>
        </item></channel></rss>"#;
        let entries = parse_feed(xml).unwrap();

        assert_eq!(entries[0].publisher(), "Outlet");
        assert_eq!(entries[0].title(), "(untitled)");
        assert_eq!(entries[0].published(), "unknown");
        assert_eq!(entries[0].url(), "https://news.google.com/rss/articles/x");
    }

    struct FixedSummary;

    impl crate::summarizer::Summarize for FixedSummary {
        async fn summarize(&self, _url: &str) -> Result<String, Box<dyn Error>> {
            Ok("Summary.".to_string())
        }
    }

    #[tokio::test]
    async fn test_blank_entry_yields_complete_item() {
        let xml = r#"<rss><channel><item>
            <title>   </title>
            <link>https://news.google.com/rss/articles/x</link>
        </item></channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        let item = crate::aggregator::to_news_item(&entries[0], &FixedSummary).await;

        assert_eq!(item.source, "Google News");
        assert_eq!(item.title, "(untitled)");
        assert_eq!(item.published, "unknown");
        for field in [&item.source, &item.title, &item.published, &item.url, &item.summary] {
            assert!(!field.trim().is_empty());
        }
    }

    fn article_link(url: &str) -> String {
        let mut payload = ARTICLE_ID_PREFIX.to_vec();
        let mut len = url.len();
        while len >= 0x80 {
            payload.push((len as u8 & 0x7f) | 0x80);
            len >>= 7;
        }
        payload.push(len as u8);
        payload.extend_from_slice(url.as_bytes());
        payload.extend_from_slice(&[0xd2, 0x01, 0x00]);
        format!(
            "https://news.google.com/rss/articles/{}?oc=5",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_article_url() {
        let url = "https://www.reuters.com/markets/global-markets-rally-2025-05-06/";
        assert_eq!(decode_article_url(&article_link(url)).as_deref(), Some(url));
    }

    #[test]
    fn test_decode_article_url_long_length_prefix() {
        let url = format!("https://outlet.example/{}", "a".repeat(200));
        assert_eq!(decode_article_url(&article_link(&url)), Some(url));
    }

    #[test]
    fn test_decode_article_url_rejects_other_links() {
        assert_eq!(decode_article_url("https://news.google.com/rss/articles/x"), None);
        assert_eq!(decode_article_url("https://example.com/story"), None);
        assert_eq!(
            decode_article_url("https://news.google.com/rss/articles/AU_yqLOpaqueNewFormatId"),
            None
        );
    }

    #[test]
    fn test_parse_feed_resolves_article_links() {
        let url = "https://outlet.example/2025/05/06/story";
        let xml = format!(
            r#"<rss><channel><item>
            <title>Story</title>
            <link>{}</link>
            <pubDate>Tue, 06 May 2025 09:00:00 GMT</pubDate>
        </item></channel></rss>"#,
            article_link(url).replace('&', "&amp;")
        );
        let entries = parse_feed(&xml).unwrap();
        assert_eq!(entries[0].url(), url);
        assert!(entries[0].link.starts_with("https://news.google.com/rss/articles/"));
    }

    #[test]
    fn test_search_url_includes_window_and_locale() {
        let client = GoogleNewsClient::new(Client::new(), "https://news.google.com/");
        assert_eq!(
            client.search_url("Global Economy"),
            "https://news.google.com/rss/search?q=Global%20Economy%20when%3A1d&hl=en-US&gl=US&ceid=US:en"
        );
    }

    #[tokio::test]
    async fn test_fetch_truncates_to_max_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rss/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Global Economy when:1d".into()),
                Matcher::UrlEncoded("hl".into(), "en-US".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/xml")
            .with_body(feed(7))
            .create_async()
            .await;

        let client = GoogleNewsClient::new(Client::new(), server.url());
        let query = SearchQuery::last_day("Global Economy", 5, Utc::now());
        let entries = client.fetch(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].title(), "Story 4 - Outlet 4");
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rss/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = GoogleNewsClient::new(Client::new(), server.url());
        let query = SearchQuery::last_day("Global Economy", 5, Utc::now());
        let err = client.fetch(&query).await.unwrap_err();
        assert!(err.to_string().starts_with("HTTP 503"));
    }
}
