//! # News Digest
//!
//! Fetches the last 24 hours of news on a topic from two sources, summarizes
//! every article, prints the digest and exports it to an Excel workbook.
//!
//! ## Features
//!
//! - Searches NewsAPI (`/v2/everything`, English, newest first) and Google News
//!   (RSS search, English, rolling one-day window)
//! - Downloads each article and builds a short extractive summary (at most
//!   five sentences), falling back to a fixed notice when a page can't be read
//! - Prints the digest to stdout and writes `news_<topic>_<YYYYMMDD>.xlsx`
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... news_digest --topic "Global Economy" --max-results 5 -o ./exports
//! ```
//!
//! ## Architecture
//!
//! The application is a single linear pass:
//! 1. **Search**: Query NewsAPI, then Google News (a failing source is reported and skipped)
//! 2. **Summarize**: Download and summarize each article, one at a time
//! 3. **Render**: Print the digest, or a notice when nothing was found
//! 4. **Export**: Write the Excel workbook

use chrono::{Local, Utc};
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod aggregator;
mod cli;
mod config;
mod models;
mod outputs;
mod sources;
mod summarizer;
mod utils;

use aggregator::aggregate;
use cli::Cli;
use config::{FileConfig, Settings};
use models::SearchQuery;
use outputs::console;
use sources::{google_news::GoogleNewsClient, newsapi::NewsApiClient};
use summarizer::ArticleSummarizer;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    // Parse CLI and merge config
    let args = Cli::parse();
    let file_config = match args.config.as_deref() {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config);
    debug!(
        topic = %settings.topic,
        max_results = settings.max_results,
        output_dir = %settings.output_dir.display(),
        export = settings.export,
        has_news_api_key = settings.news_api_key.is_some(),
        "Resolved settings"
    );

    // Early check: ensure the export dir is writable before spending time on network calls
    if settings.export {
        if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
            error!(
                path = %settings.output_dir.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Search and summarize ----
    let client = settings.http_client()?;
    let newsapi = NewsApiClient::new(
        client.clone(),
        settings.news_api_key.clone(),
        settings.newsapi_base_url.clone(),
    );
    let google_news = GoogleNewsClient::new(client.clone(), settings.google_news_base_url.clone());
    let summarizer = ArticleSummarizer::new(client);

    let query = SearchQuery::last_day(settings.topic.clone(), settings.max_results, Utc::now());
    info!(topic = %query.topic, since = %query.since, max_results = query.max_results, "Scraping and summarizing");

    let digest = aggregate(&newsapi, &google_news, &summarizer, &query).await;

    // ---- Render ----
    for warning in &digest.warnings {
        debug!(source = warning.source, "Reporting source failure");
        eprintln!("{}", warning.message);
    }
    print!("{}", console::render_digest(&digest));

    // ---- Export ----
    if let Some(path) = outputs::finish(
        &digest,
        settings.export,
        &settings.output_dir,
        &settings.topic,
        Local::now().date_naive(),
    )
    .await?
    {
        println!("Excel export written to {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = digest.items.len(),
        warnings = digest.warnings.len(),
        "Execution complete"
    );

    Ok(())
}
