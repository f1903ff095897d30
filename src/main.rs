//! # Awful News Counts
//!
//! A batch tool that reads LexisNexis HTML exports of UK newspaper coverage,
//! splits them into articles, and counts how often each term of a configured
//! vocabulary is mentioned, per publication collection, date window and day
//! of the week.
//!
//! ## Features
//!
//! - Recognises article boundaries for eight newspaper layouts (The Express,
//!   The Guardian, Daily Mail, Daily Mirror, The Daily Telegraph and three
//!   regional titles)
//! - Extracts date, title, section, length and cleaned body text per article
//! - Counts term mentions and mentioning articles, Monday to Saturday
//! - Optionally lists the headlines of articles mentioning one term on one
//!   day of the week
//! - Writes a counts CSV, a headline CSV and a JSON summary per collection
//!
//! ## Usage
//!
//! ```sh
//! awful_news_counts -c config.yaml
//! ```
//!
//! ## Architecture
//!
//! The run is sequential:
//! 1. **Configuration**: Load the YAML config, apply CLI overrides, validate
//! 2. **Extraction**: Flatten each HTML file into nodes and run the article state machine
//! 3. **Counting**: Tally terms per file, then merge into the collection totals
//! 4. **Output**: Write reports per (date window, collection) pair

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod counting;
mod errors;
mod extract;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use config::{load_config, load_key};
use utils::ensure_writable_dir;

#[instrument]
fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_counts starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.input_dir, ?args.output_dir, "Parsed CLI arguments");

    // --- Configuration ---
    let mut config = load_config(&args.config).inspect_err(|e| {
        error!(path = %args.config.display(), error = %e, "Failed to load configuration");
    })?;
    config.apply_overrides(&args);
    config.validate().inspect_err(|e| {
        error!(error = %e, "Configuration is invalid");
    })?;

    if let Some(headlines) = &config.headlines {
        config.catalog.ensure_term(&headlines.term);
        info!(
            term = %headlines.term.label,
            weekday = %headlines.weekday,
            "Headline mode enabled"
        );
    }

    // The key is not used for counting, but a missing one means the run
    // environment is not set up.
    let key = load_key(&config.key_file).inspect_err(|e| {
        error!(path = %config.key_file.display(), error = %e, "Failed to read key file");
    })?;
    debug!(?key, key_len = key.expose().len(), "Key file present");

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&config.output_dir) {
        error!(
            path = %config.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Process every (window, collection) pair ----
    let summary = pipeline::run(&config);

    let elapsed = start_time.elapsed();
    info!(
        reports_written = summary.reports_written,
        reports_failed = summary.reports_failed,
        files_skipped = summary.files_skipped,
        elapsed_secs = elapsed.as_secs_f64(),
        "Run complete"
    );
    Ok(())
}
