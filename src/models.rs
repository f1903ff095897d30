//! Data models for extracted articles and the term configuration.
//!
//! This module defines the core data structures used throughout the application:
//! - [`PublicationFormat`]: The closed set of newspaper export layouts we understand
//! - [`Publication`]: A configured publication identifier and its format
//! - [`ArticleRecord`]: One article reassembled from a LexisNexis export
//! - [`TermDefinition`] / [`TermGroup`] / [`TermCatalog`]: The injected term vocabulary
//! - [`DateWindow`]: A reporting period
//! - [`HeadlineEntry`]: One row of the optional headline listing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Separator used to express several literal alternatives in one term.
pub const OR_SEPARATOR: &str = " OR ";

/// The newspaper export layouts found in LexisNexis downloads.
///
/// Each variant carries the quirks the extraction state machine needs to
/// know about, so the machine asks the format instead of comparing
/// publication names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationFormat {
    TheExpress,
    TheGuardian,
    /// Shared by the Daily Mail and the Mail on Sunday.
    DailyMail,
    DailyMirror,
    TheDailyTelegraph,
    BirminghamEveningMail,
    ManchesterEveningNews,
    TheEveningStandard,
}

impl PublicationFormat {
    /// Suffix of the text fragment that closes the date line.
    ///
    /// Guardian exports end the date line with a timestamp (`... 11:30 PM GMT`),
    /// everything else ends with the weekday name (`... Friday`).
    pub fn date_terminator(self) -> &'static str {
        match self {
            PublicationFormat::TheGuardian => "GMT",
            _ => "day",
        }
    }

    /// Whether articles carry a `SECTION: ` label before the section name.
    pub fn has_section_marker(self) -> bool {
        !matches!(self, PublicationFormat::DailyMail)
    }
}

/// A configured publication identifier mapped to its export format.
///
/// The `name` is matched case-insensitively against attribute values and
/// text fragments to find article boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Publication {
    /// The identifier exactly as it appears in the export, e.g. `"The Guardian"`.
    pub name: String,
    /// Which layout rules apply to articles from this publication.
    pub format: PublicationFormat,
}

/// One article reassembled from the node stream.
///
/// Created only once every extraction phase has completed. The record is
/// counted once and then dropped; bodies are never retained across files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// The configured identifier that opened this article.
    pub publication: String,
    /// The layout rules the article was extracted with.
    pub format: PublicationFormat,
    /// The publication date.
    pub date: NaiveDate,
    /// Section name; empty for formats without a section marker.
    pub section: String,
    /// Length line as exported, e.g. `"812 words"`.
    pub length: String,
    /// Headline with runs of spaces collapsed.
    pub title: String,
    /// Normalised body text used for term counting.
    pub body: String,
}

/// A counted term: a label plus one or more literal alternatives.
///
/// Terms are written in configuration as a single string, with alternatives
/// joined by `" OR "`:
///
/// ```yaml
/// - "migrant flood OR flood of migrants"
/// ```
///
/// Literals are kept exactly as written, including leading or trailing
/// spaces (`"Syria "` deliberately avoids counting `"Syrian"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub struct TermDefinition {
    /// The term as written in configuration; used as the report row name.
    pub label: String,
    /// The literal alternatives; any of them counts toward this term.
    pub alternatives: Vec<String>,
}

impl TermDefinition {
    /// Build a term from its configured spelling.
    pub fn parse(raw: &str) -> Self {
        let alternatives = raw.split(OR_SEPARATOR).map(str::to_string).collect();
        TermDefinition {
            label: raw.to_string(),
            alternatives,
        }
    }
}

impl From<String> for TermDefinition {
    fn from(raw: String) -> Self {
        TermDefinition::parse(&raw)
    }
}

impl From<TermDefinition> for String {
    fn from(term: TermDefinition) -> Self {
        term.label
    }
}

/// A labelled, ordered group of terms ("Countries", "Syrian Cities", ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TermGroup {
    /// Category label written to the `Term Type` column.
    pub label: String,
    /// Terms in report order.
    pub terms: Vec<TermDefinition>,
}

/// Position of a term within the configured groups, flattened.
///
/// Report rows and accumulator keys both use this index, so two terms with
/// the same spelling in different groups are tallied separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(pub usize);

/// The full, ordered term configuration.
///
/// Iteration order is group order, then term order within the group; report
/// rows follow it exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCatalog {
    groups: Vec<TermGroup>,
}

impl TermCatalog {
    /// Group label used when the headline term has to be appended.
    pub const HEADLINE_GROUP: &'static str = "Headline Terms";

    pub fn new(groups: Vec<TermGroup>) -> Self {
        TermCatalog { groups }
    }

    pub fn groups(&self) -> &[TermGroup] {
        &self.groups
    }

    /// Every term with its flattened id and owning group.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &TermGroup, &TermDefinition)> {
        self.groups
            .iter()
            .flat_map(|group| group.terms.iter().map(move |term| (group, term)))
            .enumerate()
            .map(|(i, (group, term))| (TermId(i), group, term))
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.terms.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a term by its configured label.
    pub fn find(&self, label: &str) -> Option<(TermId, &TermDefinition)> {
        self.iter()
            .find(|(_, _, term)| term.label == label)
            .map(|(id, _, term)| (id, term))
    }

    /// Make sure `term` is reported, appending it in its own group if no
    /// configured term has the same label.
    pub fn ensure_term(&mut self, term: &TermDefinition) {
        if self.find(&term.label).is_some() {
            return;
        }
        match self
            .groups
            .iter_mut()
            .find(|g| g.label == Self::HEADLINE_GROUP)
        {
            Some(group) => group.terms.push(term.clone()),
            None => self.groups.push(TermGroup {
                label: Self::HEADLINE_GROUP.to_string(),
                terms: vec![term.clone()],
            }),
        }
    }
}

/// A reporting period. Both ends are exclusive.
///
/// An article dated exactly on `start` or `end` is left out; this is how
/// the reports have always been produced and is kept for comparability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// True when `date` lies strictly between `start` and `end`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.start && date < self.end
    }

    /// Directory name used for this window's reports, e.g. `2015-06-01_2015-08-31`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.start, self.end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// One row of the headline listing.
///
/// Ordered by date, then by `section + length + title` compared as one
/// string. Ties on that concatenation fall back to the individual fields
/// so ordering stays consistent with equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineEntry {
    pub date: NaiveDate,
    pub section: String,
    pub length: String,
    pub title: String,
}

impl HeadlineEntry {
    fn outline(&self) -> String {
        format!("{}{}{}", self.section, self.length, self.title)
    }
}

impl Ord for HeadlineEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.outline().cmp(&other.outline()))
            .then_with(|| self.section.cmp(&other.section))
            .then_with(|| self.length.cmp(&other.length))
    }
}

impl PartialOrd for HeadlineEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&ArticleRecord> for HeadlineEntry {
    fn from(article: &ArticleRecord) -> Self {
        HeadlineEntry {
            date: article.date,
            section: article.section.clone(),
            length: article.length.clone(),
            title: article.title.clone(),
        }
    }
}
