//! JSON summary of one (date window, collection) pair.
//!
//! Sits next to the counts CSV and records how much input went into it:
//! files read and skipped, articles extracted, articles that fell inside
//! the window, records dropped, and per-publication article counts by day.

use crate::counting::aggregate::{Accumulator, WeekdayBucket};
use crate::errors::ProcessError;
use crate::models::DateWindow;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Article counts for each day of the week, Sunday included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeekdayCounts {
    pub monday: u64,
    pub tuesday: u64,
    pub wednesday: u64,
    pub thursday: u64,
    pub friday: u64,
    pub saturday: u64,
    pub sunday: u64,
}

impl From<&WeekdayBucket> for WeekdayCounts {
    fn from(bucket: &WeekdayBucket) -> Self {
        WeekdayCounts {
            monday: bucket.get(Weekday::Mon),
            tuesday: bucket.get(Weekday::Tue),
            wednesday: bucket.get(Weekday::Wed),
            thursday: bucket.get(Weekday::Thu),
            friday: bucket.get(Weekday::Fri),
            saturday: bucket.get(Weekday::Sat),
            sunday: bucket.get(Weekday::Sun),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublicationSummary {
    pub name: String,
    pub articles: u64,
    pub articles_by_day: WeekdayCounts,
}

/// Everything recorded about one collection within one window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectionSummary {
    pub collection: String,
    pub window_start: String,
    pub window_end: String,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub articles_extracted: u64,
    pub articles_in_window: u64,
    pub records_dropped: u64,
    pub headlines: Option<usize>,
    pub publications: Vec<PublicationSummary>,
}

/// Per-collection counters that are not term statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub files_processed: u64,
    pub files_skipped: u64,
    pub articles_extracted: u64,
    pub articles_in_window: u64,
    pub records_dropped: u64,
}

impl CollectionSummary {
    pub fn new(
        collection: &str,
        window: &DateWindow,
        stats: CollectionStats,
        totals: &Accumulator,
        headlines: Option<usize>,
    ) -> Self {
        CollectionSummary {
            collection: collection.to_string(),
            window_start: window.start.to_string(),
            window_end: window.end.to_string(),
            files_processed: stats.files_processed,
            files_skipped: stats.files_skipped,
            articles_extracted: stats.articles_extracted,
            articles_in_window: stats.articles_in_window,
            records_dropped: stats.records_dropped,
            headlines,
            publications: totals
                .publications()
                .map(|(name, tally)| PublicationSummary {
                    name: name.to_string(),
                    articles: tally.articles,
                    articles_by_day: WeekdayCounts::from(&tally.articles_by_day),
                })
                .collect(),
        }
    }
}

/// Write `<collection>Summary.json` into `dir`.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), collection = %summary.collection))]
pub fn write_summary(dir: &Path, summary: &CollectionSummary) -> Result<(), ProcessError> {
    let path = dir.join(format!("{}Summary.json", summary.collection));
    let json = serde_json::to_string_pretty(summary).map_err(|source| ProcessError::Summary {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| ProcessError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Wrote collection summary");
    Ok(())
}
