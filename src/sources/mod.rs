//! News search clients for the two upstream services.
//!
//! Each client follows the same contract: take a [`SearchQuery`], return the
//! raw records exactly as the service ordered them, capped at
//! `query.max_results`. Records differ in shape per service but all expose
//! the four fields a digest row needs through [`SourceRecord`].
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | NewsAPI | [`newsapi`] | `/v2/everything` JSON API | Requires API key; filtered by `from` timestamp |
//! | Google News | [`google_news`] | RSS search | Rolling `when:1d` window, no key |
//!
//! # Common Patterns
//!
//! Clients share one `reqwest::Client` built by the caller and accept a base
//! URL so tests can point them at a local mock server. Errors are returned,
//! never swallowed: deciding that a failed source means "zero results" is
//! the aggregator's job.

use crate::models::SearchQuery;
use std::error::Error;

pub mod google_news;
pub mod newsapi;

/// Title used when a source returns a blank headline.
pub const UNTITLED: &str = "(untitled)";

/// Timestamp used when a source omits the publication time.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// `Some(s)` only when `s` has non-whitespace content.
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// A searchable news service.
pub trait NewsSource {
    /// The raw record type this service returns.
    type Record: SourceRecord;

    /// Human-readable name used in warnings and logs.
    fn label(&self) -> &'static str;

    /// Run one search.
    ///
    /// # Returns
    ///
    /// At most `query.max_results` records in the order the service returned them.
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Self::Record>, Box<dyn Error>>;
}

/// Accessors mapping a raw source record onto the digest row shape.
pub trait SourceRecord {
    fn publisher(&self) -> &str;
    fn title(&self) -> &str;
    fn published(&self) -> &str;
    fn url(&self) -> &str;
}
