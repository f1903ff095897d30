//! The batch run: windows, then collections, then files, then nodes.
//!
//! Everything is sequential. Each file produces its own partial
//! [`Accumulator`] (and headline set), which is merged into the running
//! totals for the current (window, collection) pair. A file that cannot be
//! read is logged and contributes nothing.

use crate::config::{Config, HeadlineSettings};
use crate::counting::aggregate::Accumulator;
use crate::counting::headlines::HeadlineCollector;
use crate::errors::{ExtractError, ProcessError};
use crate::extract::boundary::BoundaryDetector;
use crate::extract::machine::Articles;
use crate::extract::node::NodeStream;
use crate::models::{DateWindow, TermCatalog};
use crate::outputs::json::{CollectionStats, CollectionSummary, write_summary};
use crate::outputs::reports::{write_counts, write_headlines};
use crate::utils::truncate_for_log;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// What one document contributed.
#[derive(Debug)]
pub struct FileResult {
    pub totals: Accumulator,
    pub headlines: Option<HeadlineCollector>,
    pub stats: CollectionStats,
}

/// Running totals for one (window, collection) pair.
#[derive(Debug)]
pub struct CollectionResult {
    pub name: String,
    pub totals: Accumulator,
    pub headlines: Option<HeadlineCollector>,
    pub stats: CollectionStats,
}

impl CollectionResult {
    fn new(name: &str, headlines: Option<&HeadlineCollector>) -> Self {
        CollectionResult {
            name: name.to_string(),
            totals: Accumulator::new(),
            headlines: headlines.map(HeadlineCollector::empty_like),
            stats: CollectionStats::default(),
        }
    }

    /// Fold one file's contribution into the running totals.
    pub fn merge(&mut self, file: FileResult) {
        self.totals.merge(&file.totals);
        if let (Some(running), Some(partial)) = (self.headlines.as_mut(), file.headlines) {
            running.merge(partial);
        }
        self.stats.files_processed += 1;
        self.stats.articles_extracted += file.stats.articles_extracted;
        self.stats.articles_in_window += file.stats.articles_in_window;
        self.stats.records_dropped += file.stats.records_dropped;
    }
}

fn headline_collector(settings: &HeadlineSettings) -> HeadlineCollector {
    HeadlineCollector::new(settings.term.clone(), settings.weekday)
}

/// Shared, read-only inputs for a run.
#[derive(Debug)]
pub struct Processor<'a> {
    detector: BoundaryDetector,
    catalog: &'a TermCatalog,
    /// Empty collector every file and collection starts from.
    headlines: Option<HeadlineCollector>,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a Config) -> Self {
        let detector = BoundaryDetector::new(&config.publications);
        debug!(
            publications = ?detector.publications().iter().map(|p| &p.name).collect::<Vec<_>>(),
            "Recognised publications"
        );
        Processor {
            detector,
            catalog: &config.catalog,
            headlines: config.headlines.as_ref().map(headline_collector),
        }
    }

    /// Extract and count every article of one HTML document.
    pub fn process_document(&self, html: &str, window: &DateWindow) -> FileResult {
        let mut result = FileResult {
            totals: Accumulator::new(),
            headlines: self.headlines.as_ref().map(HeadlineCollector::empty_like),
            stats: CollectionStats::default(),
        };

        for extracted in Articles::new(NodeStream::parse(html), &self.detector) {
            let article = match extracted {
                Ok(article) => article,
                Err(e) => {
                    result.stats.records_dropped += 1;
                    match &e {
                        ExtractError::Parse { raw, .. } => {
                            warn!(error = %e, raw = %truncate_for_log(raw, 120), "Dropped article with bad date")
                        }
                        ExtractError::MarkerNotFound { .. } => {
                            debug!(error = %e, "Dropped incomplete article")
                        }
                    }
                    continue;
                }
            };
            result.stats.articles_extracted += 1;
            if !window.contains(article.date) {
                continue;
            }
            result.stats.articles_in_window += 1;
            result.totals.record(&article, self.catalog);
            if let Some(headlines) = result.headlines.as_mut() {
                headlines.offer(&article);
            }
        }
        result
    }

    /// Read and process one file.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn process_file(&self, path: &Path, window: &DateWindow) -> Result<FileResult, ProcessError> {
        let bytes = fs::read(path).map_err(|source| ProcessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8_lossy(&bytes);
        let result = self.process_document(&html, window);
        debug!(
            extracted = result.stats.articles_extracted,
            in_window = result.stats.articles_in_window,
            dropped = result.stats.records_dropped,
            "Processed file"
        );
        Ok(result)
    }

    /// Process every markup file in one collection directory.
    #[instrument(level = "info", skip_all, fields(collection = %dir.display(), window = %window))]
    pub fn process_collection(&self, dir: &Path, window: &DateWindow) -> io::Result<CollectionResult> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let collection = self.process_files(&name, &list_markup_files(dir)?, window);

        info!(
            files = collection.stats.files_processed,
            skipped = collection.stats.files_skipped,
            articles = collection.totals.articles(),
            "Processed collection"
        );
        if collection.totals.is_empty() {
            info!("No articles fell inside the window");
        }
        if let Some(headlines) = collection.headlines.as_ref().filter(|h| h.is_empty()) {
            info!(term = %headlines.term().label, "No headlines matched");
        }
        for (publication, tally) in collection.totals.publications() {
            info!(%publication, articles = tally.articles, "Publication article count");
            for (day, count) in tally.articles_by_day.iter() {
                debug!(%publication, %day, count, "Publication article count by day");
            }
        }
        Ok(collection)
    }

    /// Process the given files in order into one collection's totals.
    ///
    /// A file that cannot be read is logged, counted as skipped, and
    /// contributes nothing.
    pub fn process_files(&self, name: &str, paths: &[PathBuf], window: &DateWindow) -> CollectionResult {
        let mut collection = CollectionResult::new(name, self.headlines.as_ref());
        for path in paths {
            match self.process_file(path, window) {
                Ok(file) => collection.merge(file),
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Skipping unreadable file");
                    collection.stats.files_skipped += 1;
                }
            }
        }
        collection
    }

    /// Write the counts CSV, the summary JSON, and the headline CSV if enabled.
    pub fn write_reports(
        &self,
        dir: &Path,
        window: &DateWindow,
        collection: &CollectionResult,
    ) -> Result<(), ProcessError> {
        write_counts(dir, &collection.name, self.catalog, &collection.totals)?;
        if let Some(headlines) = &collection.headlines {
            write_headlines(dir, &collection.name, headlines)?;
        }
        let summary = CollectionSummary::new(
            &collection.name,
            window,
            collection.stats,
            &collection.totals,
            collection.headlines.as_ref().map(HeadlineCollector::len),
        );
        write_summary(dir, &summary)
    }
}

/// Totals across the whole run, for the final log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports_written: u64,
    pub reports_failed: u64,
    pub files_skipped: u64,
}

/// Run every (window, collection) pair and write its reports.
///
/// Only per-pair problems happen here, and none of them stop the run.
pub fn run(config: &Config) -> RunSummary {
    let processor = Processor::new(config);
    let mut summary = RunSummary::default();

    let collections = match list_collections(&config.input_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            error!(path = %config.input_dir.display(), error = %e, "Cannot list input directory");
            return summary;
        }
    };
    info!(count = collections.len(), input = %config.input_dir.display(), "Found collections");

    for window in &config.windows {
        let out_dir = config.output_dir.join(window.label());
        if let Err(e) = fs::create_dir_all(&out_dir) {
            error!(path = %out_dir.display(), error = %e, "Cannot create window output directory");
            summary.reports_failed += collections.len() as u64;
            continue;
        }

        for dir in &collections {
            let collection = match processor.process_collection(dir, window) {
                Ok(c) => c,
                Err(e) => {
                    error!(path = %dir.display(), error = %e, "Cannot list collection");
                    summary.reports_failed += 1;
                    continue;
                }
            };
            summary.files_skipped += collection.stats.files_skipped;
            match processor.write_reports(&out_dir, window, &collection) {
                Ok(()) => summary.reports_written += 1,
                Err(e) => {
                    error!(collection = %collection.name, error = %e, "Failed to write reports");
                    summary.reports_failed += 1;
                }
            }
        }
    }
    summary
}

/// Subdirectories of `root`, sorted by name. Plain files are ignored.
pub fn list_collections(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Markup files directly inside `dir`, sorted by name.
pub fn list_markup_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_markup_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// LexisNexis exports end in `.htm` or `.HTML`.
pub fn is_markup_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".htm") || n.ends_with(".HTML"))
}
