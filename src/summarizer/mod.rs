//! Article summarization: download, extract, summarize, tidy.
//!
//! The pipeline for one URL:
//!
//! 1. **Download** the page with the shared HTTP client
//! 2. **Extract** title and body text ([`extract`])
//! 3. **Summarize** by sentence scoring ([`nlp`])
//! 4. **Tidy** into at most [`MAX_SUMMARY_SENTENCES`] period-terminated sentences
//!
//! Any failure along the way collapses into [`SUMMARY_FALLBACK`] via
//! [`summarize_or_fallback`]. There is no retry and no partial summary.

use crate::models::SUMMARY_FALLBACK;
use crate::utils::truncate_for_log;
use itertools::Itertools;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, instrument, warn};

pub mod extract;
pub mod nlp;

/// Upper bound on sentences kept in a tidied summary.
pub const MAX_SUMMARY_SENTENCES: usize = 5;

/// Turns an article URL into summary text.
pub trait Summarize {
    /// Summarize the article at `url`.
    ///
    /// # Errors
    ///
    /// Any download, parse or empty-content failure.
    async fn summarize(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Summarize `url`, substituting [`SUMMARY_FALLBACK`] for any error.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn summarize_or_fallback<S: Summarize>(summarizer: &S, url: &str) -> String {
    match summarizer.summarize(url).await {
        Ok(summary) => {
            debug!(summary = %truncate_for_log(&summary, 120), "Summarized article");
            summary
        }
        Err(e) => {
            warn!(%url, error = %e, "Summary unavailable; using fallback");
            SUMMARY_FALLBACK.to_string()
        }
    }
}

/// Normalize a raw summary into at most [`MAX_SUMMARY_SENTENCES`] sentences.
///
/// The text is split on every `.`, fragments are trimmed, empty fragments are
/// dropped, and the first five are joined with `". "` plus a final `"."`.
///
/// Returns `None` when no fragment survives.
pub fn tidy_summary(raw: &str) -> Option<String> {
    let sentences = raw
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SUMMARY_SENTENCES)
        .collect::<Vec<_>>();

    if sentences.is_empty() {
        None
    } else {
        Some(format!("{}.", sentences.iter().join(". ")))
    }
}

/// Downloads an article page and summarizes it locally.
#[derive(Debug, Clone)]
pub struct ArticleSummarizer {
    client: Client,
}

impl ArticleSummarizer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Summarize for ArticleSummarizer {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn summarize(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}").into());
        }

        let html = response.text().await?;
        let article = extract::extract_article(&html)?;
        let raw = nlp::summarize(&article.title, &article.text, MAX_SUMMARY_SENTENCES);
        debug!(bytes = html.len(), raw_len = raw.len(), "Derived raw summary");

        tidy_summary(&raw).ok_or_else(|| "summary contains no sentences".into())
    }
}
