//! Headline listing for articles that mention one chosen term.
//!
//! Only articles published on the configured weekday (Saturday unless set
//! otherwise) are listed. Entries are kept in a sorted set, so the same
//! article appearing in two overlapping exports is listed once.

use crate::counting::counter;
use crate::models::{ArticleRecord, HeadlineEntry, TermDefinition};
use chrono::{Datelike, Weekday};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HeadlineCollector {
    term: TermDefinition,
    weekday: Weekday,
    entries: BTreeSet<HeadlineEntry>,
}

impl HeadlineCollector {
    pub fn new(term: TermDefinition, weekday: Weekday) -> Self {
        HeadlineCollector {
            term,
            weekday,
            entries: BTreeSet::new(),
        }
    }

    /// A fresh, empty collector with the same term and weekday.
    pub fn empty_like(&self) -> Self {
        HeadlineCollector::new(self.term.clone(), self.weekday)
    }

    pub fn term(&self) -> &TermDefinition {
        &self.term
    }

    /// Record `article` if it matches; returns whether it was newly added.
    pub fn offer(&mut self, article: &ArticleRecord) -> bool {
        if article.date.weekday() != self.weekday || !counter::contains(&self.term, &article.body) {
            return false;
        }
        let added = self.entries.insert(HeadlineEntry::from(article));
        if added {
            debug!(date = %article.date, title = %article.title, "Collected headline");
        }
        added
    }

    /// Move every entry of `other` into `self`.
    pub fn merge(&mut self, other: HeadlineCollector) {
        self.entries.extend(other.entries);
    }

    /// Entries in date, then outline order.
    pub fn entries(&self) -> impl Iterator<Item = &HeadlineEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationFormat;
    use chrono::NaiveDate;

    fn article(date: (i32, u32, u32), title: &str, body: &str) -> ArticleRecord {
        ArticleRecord {
            publication: "The Guardian".to_string(),
            format: PublicationFormat::TheGuardian,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            section: "WORLD NEWS".to_string(),
            length: "700 words".to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn collector() -> HeadlineCollector {
        HeadlineCollector::new(TermDefinition::parse("Syria"), Weekday::Sat)
    }

    #[test]
    fn test_wrong_weekday_is_ignored() {
        let mut headlines = collector();
        // 2015-09-09 is a Wednesday.
        assert!(!headlines.offer(&article((2015, 9, 9), "Midweek", " Syria talks ")));
        assert!(headlines.is_empty());
    }

    #[test]
    fn test_saturday_article_with_term_is_collected() {
        let mut headlines = collector();
        assert!(headlines.offer(&article((2015, 9, 12), "Weekend", " Syria talks ")));
        assert_eq!(headlines.len(), 1);
        let entry = headlines.entries().next().unwrap();
        assert_eq!(entry.title, "Weekend");
        assert_eq!(entry.section, "WORLD NEWS");
        assert_eq!(entry.length, "700 words");
    }

    #[test]
    fn test_saturday_article_without_term_is_ignored() {
        let mut headlines = collector();
        assert!(!headlines.offer(&article((2015, 9, 12), "Weekend", " Brexit talks ")));
        assert!(headlines.is_empty());
    }

    #[test]
    fn test_identical_entries_collapse() {
        let mut headlines = collector();
        let a = article((2015, 9, 12), "Weekend", " Syria talks ");
        assert!(headlines.offer(&a));
        assert!(!headlines.offer(&a));
        assert_eq!(headlines.len(), 1);
    }

    #[test]
    fn test_merge_keeps_sorted_order() {
        let mut running = collector();
        running.offer(&article((2015, 9, 19), "Later", " Syria "));
        let mut partial = running.empty_like();
        partial.offer(&article((2015, 9, 12), "Earlier", " Syria "));
        partial.offer(&article((2015, 9, 19), "Later", " Syria "));
        running.merge(partial);

        let titles: Vec<&str> = running.entries().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Earlier", "Later"]);
    }
}
