//! Data models for search inputs, raw source records and digest rows.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SearchQuery`]: The topic, lookback boundary and result cap shared by every source
//! - [`NewsItem`]: One normalized row of the digest, regardless of which source produced it
//! - [`SourceWarning`]: A user-visible report of a failed source call
//! - [`Digest`]: The ordered rows and warnings produced by a single run
//!
//! Raw per-source records live next to their clients in [`crate::sources`].

use chrono::{DateTime, Duration, Utc};

/// How far back both sources look for articles.
pub const LOOKBACK_HOURS: i64 = 24;

/// Placeholder summary used whenever an article cannot be summarized.
pub const SUMMARY_FALLBACK: &str = "Summary unavailable for this source.";

/// The inputs shared by every news source for one run.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Free-text topic, passed to each source as its keyword query.
    pub topic: String,
    /// Oldest publication time of interest.
    pub since: DateTime<Utc>,
    /// Maximum number of records requested from each source.
    pub max_results: u8,
}

impl SearchQuery {
    /// Build a query covering the last [`LOOKBACK_HOURS`] relative to `now`.
    pub fn last_day(topic: impl Into<String>, max_results: u8, now: DateTime<Utc>) -> Self {
        Self {
            topic: topic.into(),
            since: now - Duration::hours(LOOKBACK_HOURS),
            max_results,
        }
    }
}

/// One row of the digest.
///
/// All five fields are always populated. `summary` holds either text derived
/// from the article or [`SUMMARY_FALLBACK`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Publisher name as reported by the source.
    pub source: String,
    /// Article headline.
    pub title: String,
    /// Publication timestamp, verbatim from the source.
    pub published: String,
    /// Link to the article.
    pub url: String,
    /// Extractive summary or the fallback sentinel.
    pub summary: String,
}

/// A failed source call, phrased for the person running the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWarning {
    /// Label of the source that failed (e.g. `"NewsAPI"`).
    pub source: &'static str,
    /// Full message, e.g. `"NewsAPI Error: missing API key"`.
    pub message: String,
}

impl SourceWarning {
    pub fn new(source: &'static str, error: impl std::fmt::Display) -> Self {
        Self {
            source,
            message: format!("{source} Error: {error}"),
        }
    }
}

/// Everything one run produced: rows in output order plus any source warnings.
#[derive(Debug, Default)]
pub struct Digest {
    pub items: Vec<NewsItem>,
    pub warnings: Vec<SourceWarning>,
}

impl Digest {
    /// `true` when neither source contributed a row.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
