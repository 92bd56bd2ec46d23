//! NewsAPI `/v2/everything` client.
//!
//! Searches [NewsAPI](https://newsapi.org) for English articles matching the
//! topic and published after the query's `since` timestamp, newest first.
//!
//! # Request
//!
//! ```text
//! GET {base}/v2/everything?q=<topic>&from=<since>&language=en&sortBy=publishedAt&pageSize=<max>
//! X-Api-Key: <key>
//! ```
//!
//! # Failure
//!
//! NewsAPI reports errors as `{"status": "error", "code": "...", "message": "..."}`,
//! usually with a 4xx status. The code and message are surfaced verbatim so the
//! user can tell a bad key from an exhausted quota.

use crate::models::SearchQuery;
use crate::sources::{non_blank, NewsSource, SourceRecord, UNKNOWN_TIMESTAMP, UNTITLED};
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

const UNKNOWN_PUBLISHER: &str = "Unknown";

/// Envelope returned by `/v2/everything`, for both success and error bodies.
#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    code: Option<String>,
    message: Option<String>,
}

/// One article as returned by NewsAPI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: NewsApiPublisher,
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub published_at: String,
}

/// The `source` object nested in each article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsApiPublisher {
    pub name: Option<String>,
}

impl SourceRecord for NewsApiArticle {
    fn publisher(&self) -> &str {
        non_blank(self.source.name.as_deref()).unwrap_or(UNKNOWN_PUBLISHER)
    }

    fn title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    fn published(&self) -> &str {
        non_blank(Some(self.published_at.as_str())).unwrap_or(UNKNOWN_TIMESTAMP)
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Client for the NewsAPI search endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiClient {
    /// Create a client.
    ///
    /// A missing `api_key` is not an error here; every [`NewsSource::fetch`]
    /// call will fail instead, so the run can still proceed with other sources.
    pub fn new(client: Client, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }
}

impl NewsSource for NewsApiClient {
    type Record = NewsApiArticle;

    fn label(&self) -> &'static str {
        "NewsAPI"
    }

    #[instrument(level = "info", skip_all, fields(topic = %query.topic, max = query.max_results))]
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<NewsApiArticle>, Box<dyn Error>> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or("missing API key (set NEWS_API_KEY or --news-api-key)")?;

        let endpoint = format!("{}/v2/everything", self.base_url.trim_end_matches('/'));
        let from = query.since.format("%Y-%m-%dT%H:%M:%S").to_string();
        let page_size = query.max_results.to_string();

        debug!(%endpoint, %from, "Querying NewsAPI");
        let response = self
            .client
            .get(&endpoint)
            .header("X-Api-Key", api_key)
            .query(&[
                ("q", query.topic.as_str()),
                ("from", from.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let parsed: EverythingResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(format!("HTTP {status}: {}", truncate_for_log(&body, 200)).into());
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() || parsed.status != "ok" {
            let message = parsed
                .message
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(match parsed.code {
                Some(code) => format!("{code}: {message}"),
                None => message,
            }
            .into());
        }

        let mut articles = parsed.articles;
        articles.truncate(query.max_results as usize);

        info!(count = articles.len(), "Fetched NewsAPI articles");
        Ok(articles)
    }
}
