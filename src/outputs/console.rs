//! Plain-text rendering of the digest for the terminal.

use crate::models::{Digest, NewsItem};

/// Shown instead of the digest when neither source returned anything.
pub const EMPTY_NOTICE: &str = "No news found in the last 24 hours for this topic.";

const DIVIDER: &str = "────────────────────────────────────────────────────────────";

/// Render one item as a block of lines.
pub fn render_item(item: &NewsItem) -> String {
    format!(
        "{}\n{} | {}\n\nSummary: {}\nRead original article: {}\n",
        item.title, item.published, item.source, item.summary, item.url
    )
}

/// Render every item of the digest separated by dividers, or [`EMPTY_NOTICE`].
pub fn render_digest(digest: &Digest) -> String {
    if digest.is_empty() {
        return format!("{EMPTY_NOTICE}\n");
    }

    digest
        .items
        .iter()
        .map(|item| format!("{}{DIVIDER}\n", render_item(item)))
        .collect()
}
