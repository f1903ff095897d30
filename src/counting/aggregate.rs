//! Running tallies for one (date window, collection) pair.
//!
//! Each input file produces its own [`Accumulator`], which is then merged
//! into the collection's running total. Merging only ever adds, key by key,
//! so the order in which files are merged does not change the result.

use crate::counting::counter;
use crate::models::{ArticleRecord, TermCatalog, TermId};
use chrono::{Datelike, Weekday};
use std::collections::BTreeMap;

/// Monday to Saturday, the days that appear in reports.
pub const REPORTED_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Counts per day of the week. Sunday is tracked but never reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayBucket {
    counts: [u64; 7],
}

impl WeekdayBucket {
    pub fn get(&self, day: Weekday) -> u64 {
        self.counts[day.num_days_from_monday() as usize]
    }

    pub fn add(&mut self, day: Weekday, n: u64) {
        self.counts[day.num_days_from_monday() as usize] += n;
    }

    pub fn merge(&mut self, other: &WeekdayBucket) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }

    /// Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u64)> + '_ {
        ALL_DAYS.into_iter().zip(self.counts)
    }
}

/// Totals for one term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermTally {
    /// Number of times the term was mentioned.
    pub mentions: u64,
    /// Number of articles mentioning the term at least once.
    pub articles: u64,
    pub mentions_by_day: WeekdayBucket,
    pub articles_by_day: WeekdayBucket,
}

impl TermTally {
    fn merge(&mut self, other: &TermTally) {
        self.mentions += other.mentions;
        self.articles += other.articles;
        self.mentions_by_day.merge(&other.mentions_by_day);
        self.articles_by_day.merge(&other.articles_by_day);
    }
}

/// Article totals for one publication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationTally {
    pub articles: u64,
    pub articles_by_day: WeekdayBucket,
}

impl PublicationTally {
    fn merge(&mut self, other: &PublicationTally) {
        self.articles += other.articles;
        self.articles_by_day.merge(&other.articles_by_day);
    }
}

/// Per-term and per-publication tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    terms: BTreeMap<TermId, TermTally>,
    publications: BTreeMap<String, PublicationTally>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every catalog term in `article` and tally the article itself.
    ///
    /// The caller is responsible for the date-window check.
    pub fn record(&mut self, article: &ArticleRecord, catalog: &TermCatalog) {
        let day = article.date.weekday();

        let publication = self
            .publications
            .entry(article.publication.clone())
            .or_default();
        publication.articles += 1;
        publication.articles_by_day.add(day, 1);

        for (id, _, term) in catalog.iter() {
            let n = counter::count(term, &article.body);
            let tally = self.terms.entry(id).or_default();
            tally.mentions += n;
            tally.mentions_by_day.add(day, n);
            if n > 0 {
                tally.articles += 1;
                tally.articles_by_day.add(day, 1);
            }
        }
    }

    /// Add every key of `partial` into `self`.
    ///
    /// Keys missing from `self` start at zero; keys missing from `partial`
    /// are left untouched.
    pub fn merge(&mut self, partial: &Accumulator) {
        for (id, tally) in &partial.terms {
            self.terms.entry(*id).or_default().merge(tally);
        }
        for (name, tally) in &partial.publications {
            self.publications.entry(name.clone()).or_default().merge(tally);
        }
    }

    pub fn term(&self, id: TermId) -> Option<&TermTally> {
        self.terms.get(&id)
    }

    #[cfg(test)]
    pub fn publication(&self, name: &str) -> Option<&PublicationTally> {
        self.publications.get(name)
    }

    pub fn publications(&self) -> impl Iterator<Item = (&str, &PublicationTally)> {
        self.publications.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total articles recorded across all publications.
    pub fn articles(&self) -> u64 {
        self.publications.values().map(|p| p.articles).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.publications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PublicationFormat, TermDefinition, TermGroup};
    use chrono::NaiveDate;
    use itertools::Itertools;

    fn catalog() -> TermCatalog {
        TermCatalog::new(vec![TermGroup {
            label: "People".to_string(),
            terms: vec![
                TermDefinition::parse("refugee"),
                TermDefinition::parse("migrant OR asylum seeker"),
            ],
        }])
    }

    fn article(publication: &str, date: (i32, u32, u32), body: &str) -> ArticleRecord {
        ArticleRecord {
            publication: publication.to_string(),
            format: PublicationFormat::TheGuardian,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            section: String::new(),
            length: "100 words".to_string(),
            title: "Title".to_string(),
            body: body.to_string(),
        }
    }

    fn file(articles: &[ArticleRecord]) -> Accumulator {
        let catalog = catalog();
        let mut acc = Accumulator::new();
        for a in articles {
            acc.record(a, &catalog);
        }
        acc
    }

    #[test]
    fn test_weekday_bucket() {
        let mut bucket = WeekdayBucket::default();
        bucket.add(Weekday::Sat, 2);
        bucket.add(Weekday::Sun, 5);
        assert_eq!(bucket.get(Weekday::Sat), 2);
        assert_eq!(bucket.get(Weekday::Mon), 0);
        assert_eq!(bucket.iter().map(|(_, n)| n).sum::<u64>(), 7);
        let days: Vec<Weekday> = bucket.iter().map(|(d, _)| d).collect();
        assert_eq!(days.first(), Some(&Weekday::Mon));
        assert_eq!(days.last(), Some(&Weekday::Sun));
    }

    #[test]
    fn test_record_counts_mentions_and_articles() {
        // 2015-06-05 is a Friday.
        let acc = file(&[
            article("The Guardian", (2015, 6, 5), " A refugee and a Refugee . "),
            article("The Guardian", (2015, 6, 5), " A migrant . "),
        ]);

        let refugee = acc.term(TermId(0)).unwrap();
        assert_eq!(refugee.mentions, 2);
        assert_eq!(refugee.articles, 1);
        assert_eq!(refugee.mentions_by_day.get(Weekday::Fri), 2);
        assert_eq!(refugee.articles_by_day.get(Weekday::Fri), 1);

        let migrant = acc.term(TermId(1)).unwrap();
        assert_eq!(migrant.mentions, 1);
        assert_eq!(migrant.articles, 1);

        let guardian = acc.publication("The Guardian").unwrap();
        assert_eq!(guardian.articles, 2);
        assert_eq!(guardian.articles_by_day.get(Weekday::Fri), 2);
        assert_eq!(acc.articles(), 2);
    }

    #[test]
    fn test_merge_adds_missing_keys_and_leaves_others() {
        let mut running = file(&[article("The Express", (2015, 6, 6), " refugee ")]);
        let partial = file(&[article("The Guardian", (2015, 6, 8), " migrant ")]);
        running.merge(&partial);

        assert_eq!(running.publication("The Express").unwrap().articles, 1);
        assert_eq!(running.publication("The Guardian").unwrap().articles, 1);
        assert_eq!(running.term(TermId(0)).unwrap().mentions, 1);
        assert_eq!(running.term(TermId(1)).unwrap().mentions_by_day.get(Weekday::Mon), 1);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let a = file(&[article("The Express", (2015, 6, 6), " refugee ")]);
        let mut merged = a.clone();
        merged.merge(&Accumulator::new());
        assert_eq!(merged, a);

        let mut from_empty = Accumulator::new();
        from_empty.merge(&a);
        assert_eq!(from_empty, a);
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let a = vec![article("The Express", (2015, 6, 6), " refugee refugee ")];
        let b = vec![
            article("The Guardian", (2015, 6, 8), " Migrant asylum seeker "),
            article("The Guardian", (2015, 6, 9), " nothing "),
        ];
        let c = vec![article("The Express", (2015, 6, 13), " Refugee migrant ")];

        let concatenated = file(&[a.clone(), b.clone(), c.clone()].concat());

        for order in [&a, &b, &c].into_iter().permutations(3) {
            let mut running = Accumulator::new();
            for part in order {
                running.merge(&file(part));
            }
            assert_eq!(running, concatenated);
        }

        // (a + b) + c == a + (b + c)
        let mut ab = file(&a);
        ab.merge(&file(&b));
        ab.merge(&file(&c));
        let mut bc = file(&b);
        bc.merge(&file(&c));
        let mut a_bc = file(&a);
        a_bc.merge(&bc);
        assert_eq!(ab, a_bc);
    }

    #[test]
    fn test_empty_accumulator() {
        let acc = Accumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.articles(), 0);
        assert!(acc.term(TermId(0)).is_none());
    }
}
