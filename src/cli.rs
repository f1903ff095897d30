//! Command-line interface definitions for Awful News Counts.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Everything except the config path is optional and overrides the value
//! from the config file.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Awful News Counts application.
///
/// # Examples
///
/// ```sh
/// # Run with the default ./config.yaml
/// awful_news_counts
///
/// # Point at another config and list Saturday headlines mentioning Syria
/// awful_news_counts -c runs/felicity.yaml --headline-term Syria
///
/// # Write reports somewhere else
/// awful_news_counts -c runs/emma.yaml -o /tmp/reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML run configuration
    #[arg(short, long, env = "NEWS_COUNTS_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Input root holding one subdirectory per collection (overrides config)
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Output root for the reports (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Path to the single-line key file (overrides config)
    #[arg(long, env = "NEWS_COUNTS_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// List headlines of articles mentioning this term (enables headline mode)
    #[arg(long)]
    pub headline_term: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["awful_news_counts"]);
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        assert!(cli.input_dir.is_none());
        assert!(cli.headline_term.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "awful_news_counts",
            "-c",
            "/tmp/run.yaml",
            "-i",
            "/tmp/in",
            "-o",
            "/tmp/out",
        ]);

        assert_eq!(cli.config, PathBuf::from("/tmp/run.yaml"));
        assert_eq!(cli.input_dir, Some(PathBuf::from("/tmp/in")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_cli_headline_term() {
        let cli = Cli::parse_from(["awful_news_counts", "--headline-term", "Syria"]);
        assert_eq!(cli.headline_term.as_deref(), Some("Syria"));
    }
}
