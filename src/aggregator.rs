//! Digest assembly: query both sources and summarize every article.
//!
//! Sources run one after the other (NewsAPI first, then Google News) and
//! every article is summarized in turn, so the digest preserves each
//! source's order with source A's rows first. A failed source contributes
//! a [`SourceWarning`] and no rows; a failed summary contributes the
//! fallback text. Nothing here aborts the run.

use crate::models::{Digest, NewsItem, SearchQuery, SourceWarning};
use crate::sources::{NewsSource, SourceRecord};
use crate::summarizer::{summarize_or_fallback, Summarize};
use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument};

/// Build the digest for `query` from two sources.
#[instrument(level = "info", skip_all, fields(topic = %query.topic, max = query.max_results))]
pub async fn aggregate<A, B, S>(
    source_a: &A,
    source_b: &B,
    summarizer: &S,
    query: &SearchQuery,
) -> Digest
where
    A: NewsSource,
    B: NewsSource,
    S: Summarize,
{
    let mut digest = Digest::default();

    collect_from(source_a, summarizer, query, &mut digest).await;
    collect_from(source_b, summarizer, query, &mut digest).await;

    info!(
        items = digest.items.len(),
        warnings = digest.warnings.len(),
        "Digest assembled"
    );
    digest
}

/// Fetch from one source and append its summarized rows (or a warning) to `digest`.
async fn collect_from<N, S>(source: &N, summarizer: &S, query: &SearchQuery, digest: &mut Digest)
where
    N: NewsSource,
    S: Summarize,
{
    let records = match source.fetch(query).await {
        Ok(records) => records,
        Err(e) => {
            error!(source = source.label(), error = %e, "Source query failed; continuing without it");
            digest.warnings.push(SourceWarning::new(source.label(), e));
            return;
        }
    };

    let items: Vec<NewsItem> = stream::iter(records.iter())
        .then(|record| to_news_item(record, summarizer))
        .collect()
        .await;

    info!(source = source.label(), count = items.len(), "Summarized source articles");
    digest.items.extend(items);
}

/// Map one raw record onto a digest row, summarizing its URL.
pub async fn to_news_item<R, S>(record: &R, summarizer: &S) -> NewsItem
where
    R: SourceRecord,
    S: Summarize,
{
    NewsItem {
        source: record.publisher().to_string(),
        title: record.title().to_string(),
        published: record.published().to_string(),
        url: record.url().to_string(),
        summary: summarize_or_fallback(summarizer, record.url()).await,
    }
}
