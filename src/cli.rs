//! Command-line interface definitions for News Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key can also come from the environment or a config file; see
//! [`crate::config`] for how the sources are merged.

use clap::Parser;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Default topic, five results per source, export to the current directory
/// news_digest
///
/// # Custom topic and cap
/// news_digest --topic "Semiconductors" --max-results 10 -o ./exports
///
/// # Print only
/// news_digest -t "Climate policy" --no-export
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search topic
    #[arg(short, long, default_value = "Global Economy")]
    pub topic: String,

    /// Max results per source (5-20)
    #[arg(
        short = 'n',
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(5..=20)
    )]
    pub max_results: u8,

    /// Output directory for the Excel export
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Print the digest without writing the Excel export
    #[arg(long)]
    pub no_export: bool,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_digest"]);

        assert_eq!(cli.topic, "Global Economy");
        assert_eq!(cli.max_results, 5);
        assert_eq!(cli.output_dir, ".");
        assert!(!cli.no_export);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "news_digest",
            "-t",
            "Semiconductors",
            "-n",
            "12",
            "-o",
            "/tmp/exports",
            "-c",
            "/tmp/config.yaml",
        ]);

        assert_eq!(cli.topic, "Semiconductors");
        assert_eq!(cli.max_results, 12);
        assert_eq!(cli.output_dir, "/tmp/exports");
        assert_eq!(cli.config.as_deref(), Some("/tmp/config.yaml"));
    }

    #[test]
    fn test_cli_max_results_bounds() {
        assert!(Cli::try_parse_from(["news_digest", "--max-results", "4"]).is_err());
        assert!(Cli::try_parse_from(["news_digest", "--max-results", "21"]).is_err());
        assert!(Cli::try_parse_from(["news_digest", "--max-results", "20"]).is_ok());
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "news_digest",
            "--news-api-key",
            "abc123",
            "--timeout-secs",
            "15",
            "--no-export",
        ]);

        assert_eq!(cli.news_api_key.as_deref(), Some("abc123"));
        assert_eq!(cli.timeout_secs, Some(15));
        assert!(cli.no_export);
    }
}
