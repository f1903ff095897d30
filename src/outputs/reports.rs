//! CSV reports.
//!
//! The counts report has one row per configured term, in group then term
//! order:
//!
//! ```text
//! Term Type,Term,Total Term Count,Total Article Count,Term Count On Monday,...,Article Count On Saturday
//! Countries,Syria ,42,17,3,...
//! ```
//!
//! Sunday is tracked by the accumulator but never written.

use crate::counting::aggregate::{Accumulator, REPORTED_DAYS};
use crate::counting::headlines::HeadlineCollector;
use crate::errors::ProcessError;
use crate::models::TermCatalog;
use crate::utils::file_safe;
use chrono::Weekday;
use csv::Writer;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Full English day name as used in report headers.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Header row of the counts report.
pub fn counts_header() -> Vec<String> {
    let mut header = vec![
        "Term Type".to_string(),
        "Term".to_string(),
        "Total Term Count".to_string(),
        "Total Article Count".to_string(),
    ];
    header.extend(REPORTED_DAYS.iter().map(|d| format!("Term Count On {}", day_name(*d))));
    header.extend(REPORTED_DAYS.iter().map(|d| format!("Article Count On {}", day_name(*d))));
    header
}

/// File name of the counts report for a collection.
pub fn counts_file_name(collection: &str) -> String {
    format!("{collection}Counts.csv")
}

/// File name of the headline report for a collection.
pub fn headlines_file_name(collection: &str, term: &str) -> String {
    format!("{collection}HeadlinesForArticlesContaining_{}.csv", file_safe(term))
}

/// Write the counts report rows to any writer.
pub fn write_counts_to<W: Write>(
    out: W,
    catalog: &TermCatalog,
    totals: &Accumulator,
) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(counts_header())?;
    for (id, group, term) in catalog.iter() {
        let tally = totals.term(id).cloned().unwrap_or_default();
        let mut row = vec![
            group.label.clone(),
            term.label.clone(),
            tally.mentions.to_string(),
            tally.articles.to_string(),
        ];
        row.extend(REPORTED_DAYS.iter().map(|d| tally.mentions_by_day.get(*d).to_string()));
        row.extend(REPORTED_DAYS.iter().map(|d| tally.articles_by_day.get(*d).to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the headline rows, oldest first, to any writer.
pub fn write_headlines_to<W: Write>(out: W, headlines: &HeadlineCollector) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(["Date", " Section", " Length", " Title"])?;
    for entry in headlines.entries() {
        wtr.write_record([
            entry.date.to_string().as_str(),
            entry.section.as_str(),
            entry.length.as_str(),
            entry.title.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `<collection>Counts.csv` into `dir`.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %collection))]
pub fn write_counts(
    dir: &Path,
    collection: &str,
    catalog: &TermCatalog,
    totals: &Accumulator,
) -> Result<(), ProcessError> {
    let path = dir.join(counts_file_name(collection));
    let result = std::fs::File::create(&path)
        .map_err(csv::Error::from)
        .and_then(|file| write_counts_to(file, catalog, totals));
    result.map_err(|source| ProcessError::Report {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = catalog.len(), "Wrote counts report");
    Ok(())
}

/// Write the headline listing for `collection` into `dir`.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %collection))]
pub fn write_headlines(
    dir: &Path,
    collection: &str,
    headlines: &HeadlineCollector,
) -> Result<(), ProcessError> {
    let path = dir.join(headlines_file_name(collection, &headlines.term().label));
    let result = std::fs::File::create(&path)
        .map_err(csv::Error::from)
        .and_then(|file| write_headlines_to(file, headlines));
    result.map_err(|source| ProcessError::Report {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = headlines.len(), "Wrote headline report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, PublicationFormat, TermDefinition, TermGroup};
    use chrono::NaiveDate;

    fn catalog() -> TermCatalog {
        TermCatalog::new(vec![
            TermGroup {
                label: "Key Migrant/Refugee Terms".to_string(),
                terms: vec![TermDefinition::parse("refugee crisis")],
            },
            TermGroup {
                label: "Countries".to_string(),
                terms: vec![TermDefinition::parse("Syria ")],
            },
        ])
    }

    fn article(date: (i32, u32, u32), title: &str, body: &str) -> ArticleRecord {
        ArticleRecord {
            publication: "The Guardian".to_string(),
            format: PublicationFormat::TheGuardian,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            section: "WORLD".to_string(),
            length: "300 words".to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_counts_header() {
        let header = counts_header().join(",");
        assert!(header.starts_with("Term Type,Term,Total Term Count,Total Article Count,Term Count On Monday,"));
        assert!(header.ends_with(",Article Count On Friday,Article Count On Saturday"));
        assert!(!header.contains("Sunday"));
        assert_eq!(counts_header().len(), 16);
    }

    #[test]
    fn test_counts_rows_follow_catalog_order_with_zeros() {
        let catalog = catalog();
        let mut totals = Accumulator::new();
        // 2015-09-12 is a Saturday.
        totals.record(&article((2015, 9, 12), "T", " the refugee crisis in Syria . "), &catalog);

        let mut buf = Vec::new();
        write_counts_to(&mut buf, &catalog, &totals).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Key Migrant/Refugee Terms,refugee crisis,1,1,0,0,0,0,0,1,0,0,0,0,0,1");
        assert_eq!(lines[2], "Countries,Syria ,2,1,0,0,0,0,0,2,0,0,0,0,0,1");
    }

    #[test]
    fn test_counts_with_no_articles_are_all_zero() {
        let mut buf = Vec::new();
        write_counts_to(&mut buf, &catalog(), &Accumulator::new()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Countries,Syria ,0,0,0,0,0,0,0,0,0,0,0,0,0,0"));
    }

    #[test]
    fn test_headlines_report() {
        let mut headlines =
            HeadlineCollector::new(TermDefinition::parse("Syria"), Weekday::Sat);
        headlines.offer(&article((2015, 9, 19), "Later, on Syria", " Syria "));
        headlines.offer(&article((2015, 9, 12), "Earlier", " Syria "));

        let mut buf = Vec::new();
        write_headlines_to(&mut buf, &headlines).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date, Section, Length, Title");
        assert_eq!(lines[1], "2015-09-12,WORLD,300 words,Earlier");
        assert_eq!(lines[2], "2015-09-19,WORLD,300 words,\"Later, on Syria\"");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(counts_file_name("Guardian"), "GuardianCounts.csv");
        assert_eq!(
            headlines_file_name("Guardian", "Syria "),
            "GuardianHeadlinesForArticlesContaining_Syria.csv"
        );
    }

    #[test]
    fn test_write_counts_to_directory() {
        let tmp = tempfile::tempdir().unwrap();
        write_counts(tmp.path(), "Express", &catalog(), &Accumulator::new()).unwrap();
        let text = std::fs::read_to_string(tmp.path().join("ExpressCounts.csv")).unwrap();
        assert!(text.starts_with("Term Type,Term,"));
    }

    #[test]
    fn test_write_counts_to_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            write_counts(&missing, "Express", &catalog(), &Accumulator::new()),
            Err(ProcessError::Report { .. })
        ));
    }
}
