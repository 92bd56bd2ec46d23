//! Runtime settings: CLI flags layered over an optional YAML config file.
//!
//! # Precedence
//!
//! 1. Command-line flags (and their environment variables, e.g. `NEWS_API_KEY`)
//! 2. `config.yaml` passed with `--config`
//! 3. Built-in defaults
//!
//! # File Format
//!
//! ```yaml
//! news_api_key: "0123456789abcdef"
//! request_timeout_secs: 10
//! user_agent: "Mozilla/5.0 (compatible; news_digest)"
//! newsapi_base_url: "https://newsapi.org"
//! google_news_base_url: "https://news.google.com"
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos surface early.

use crate::cli::Cli;
use crate::sources::{google_news, newsapi};
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 7;

/// Default `User-Agent` for API calls and article downloads.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; news_digest/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Contents of `config.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub news_api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub newsapi_base_url: Option<String>,
    pub google_news_base_url: Option<String>,
}

impl FileConfig {
    /// Parse a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Read and parse a config file.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded configuration file");
        Ok(config)
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub topic: String,
    pub max_results: u8,
    pub output_dir: PathBuf,
    pub export: bool,
    pub news_api_key: Option<String>,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub newsapi_base_url: String,
    pub google_news_base_url: String,
}

impl Settings {
    /// Merge CLI arguments over file settings over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let timeout_secs = cli
            .timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            topic: cli.topic.trim().to_string(),
            max_results: cli.max_results,
            output_dir: PathBuf::from(&cli.output_dir),
            export: !cli.no_export,
            news_api_key: cli.news_api_key.clone().or(file.news_api_key),
            request_timeout: Duration::from_secs(timeout_secs),
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            newsapi_base_url: file
                .newsapi_base_url
                .unwrap_or_else(|| newsapi::DEFAULT_BASE_URL.to_string()),
            google_news_base_url: file
                .google_news_base_url
                .unwrap_or_else(|| google_news::DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Build the HTTP client shared by both sources and the summarizer.
    pub fn http_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(self.request_timeout)
            .user_agent(&self.user_agent)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cli = Cli::parse_from(["news_digest", "--news-api-key", "cli-key"]);
        let settings = Settings::resolve(&cli, FileConfig::default());

        assert_eq!(settings.topic, "Global Economy");
        assert_eq!(settings.max_results, 5);
        assert!(settings.export);
        assert_eq!(settings.news_api_key.as_deref(), Some("cli-key"));
        assert_eq!(settings.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(settings.newsapi_base_url, "https://newsapi.org");
        assert_eq!(settings.google_news_base_url, "https://news.google.com");
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::from_yaml(
            "news_api_key: file-key\nrequest_timeout_secs: 30\nuser_agent: custom-agent\n",
        )
        .unwrap();
        let cli = Cli::parse_from([
            "news_digest",
            "--news-api-key",
            "cli-key",
            "--timeout-secs",
            "3",
            "--no-export",
        ]);
        let settings = Settings::resolve(&cli, file);

        assert_eq!(settings.news_api_key.as_deref(), Some("cli-key"));
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.user_agent, "custom-agent");
        assert!(!settings.export);
    }

    #[test]
    fn test_file_fills_gaps() {
        let file = FileConfig::from_yaml(
            "request_timeout_secs: 30\nnewsapi_base_url: http://localhost:8080\n",
        )
        .unwrap();
        let cli = Cli::parse_from(["news_digest", "--topic", "  Semiconductors  "]);
        let settings = Settings::resolve(&cli, file);

        assert_eq!(settings.topic, "Semiconductors");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.newsapi_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::from_yaml("news_api_kye: typo\n").is_err());
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "news_api_key: disk-key").unwrap();

        let config = FileConfig::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.news_api_key.as_deref(), Some("disk-key"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        assert!(FileConfig::load("/nonexistent/news_digest/config.yaml").await.is_err());
    }
}
