//! Readable-text extraction from article HTML.
//!
//! Title lookup order: `og:title` meta, `<title>`, first `<h1>`.
//! Body text comes from `<p>` elements inside `<article>` when the page has
//! one, otherwise from every `<p>` on the page. Short paragraphs (bylines,
//! captions, cookie banners) are dropped.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::debug;

/// Paragraphs shorter than this (in characters, after whitespace folding) are ignored.
const MIN_PARAGRAPH_CHARS: usize = 40;

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static ARTICLE_PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("article p").unwrap());
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Title and body text pulled out of an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// Best-effort headline; empty when the page has none.
    pub title: String,
    /// Body paragraphs separated by blank lines.
    pub text: String,
}

/// Extract the headline and body text from an HTML document.
///
/// # Errors
///
/// Returns an error when no paragraph survives filtering.
pub fn extract_article(html: &str) -> Result<ExtractedArticle, Box<dyn Error>> {
    let document = Html::parse_document(html);

    let title = document
        .select(&OG_TITLE)
        .filter_map(|el| el.value().attr("content"))
        .map(fold_whitespace)
        .chain(
            document
                .select(&TITLE)
                .chain(document.select(&H1))
                .map(|el| fold_whitespace(&el.text().collect::<String>())),
        )
        .find(|t| !t.is_empty())
        .unwrap_or_default();

    let selector = if document.select(&ARTICLE_PARAGRAPHS).next().is_some() {
        &*ARTICLE_PARAGRAPHS
    } else {
        &*PARAGRAPHS
    };

    let paragraphs: Vec<String> = document
        .select(selector)
        .map(|el| fold_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect();

    if paragraphs.is_empty() {
        return Err("no extractable article text".into());
    }

    debug!(%title, paragraphs = paragraphs.len(), "Extracted article text");
    Ok(ExtractedArticle {
        title,
        text: paragraphs.join("\n\n"),
    })
}

fn fold_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}
