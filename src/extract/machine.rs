//! The field-extraction state machine.
//!
//! After a boundary, an article is read in five strictly ordered phases:
//!
//! | Phase   | Starts                          | Completes on                         |
//! |---------|---------------------------------|--------------------------------------|
//! | Date    | right after the boundary        | fragment ending in `day` / `GMT`     |
//! | Title   | a node with value `c7`          | a node with value `c6`               |
//! | Section | a `SECTION: ` label             | the next text fragment               |
//! | Length  | a `LENGTH: ` label              | the next text fragment               |
//! | Body    | right after Length              | a `LOAD-DATE: ` fragment             |
//!
//! Formats without a section label skip straight from Title to Length with
//! an empty section. All buffers live in an [`ExtractionContext`] that is
//! created at the boundary and consumed when the article is emitted, so
//! nothing leaks from one article or document into the next.

use crate::errors::ExtractError;
use crate::extract::boundary::{Boundary, BoundaryDetector};
use crate::extract::date::parse_date;
use crate::extract::node::{Node, is_line_break};
use crate::models::ArticleRecord;
use crate::utils::{collapse_spaces, truncate_for_log};
use std::fmt;
use tracing::{debug, trace};

const TITLE_START: &str = "c7";
const TITLE_END: &str = "c6";
const SECTION_LABEL: &str = "SECTION: ";
const LENGTH_LABEL: &str = "LENGTH: ";
const BODY_END: &str = "LOAD-DATE: ";

/// Characters that get a space inserted in front of them in the body.
const PUNCTUATION: [char; 6] = ['.', '?', '!', ',', ';', ':'];
/// Quote characters replaced with a space in the body.
const QUOTES: [char; 6] = ['\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Date,
    Title,
    Section,
    Length,
    Body,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Date => "date",
            Phase::Title => "title",
            Phase::Section => "section",
            Phase::Length => "length",
            Phase::Body => "body",
        };
        f.write_str(name)
    }
}

/// Buffers for the one article currently being read.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    boundary: Boundary,
    phase: Phase,
    /// Whether the current phase's opening marker has been seen.
    opened: bool,
    date: String,
    title: String,
    section: String,
    length: String,
    body: String,
}

/// Result of feeding one node to an [`ExtractionContext`].
#[derive(Debug)]
pub enum Progress {
    Pending(ExtractionContext),
    Complete(Result<ArticleRecord, ExtractError>),
}

impl ExtractionContext {
    pub fn new(boundary: Boundary) -> Self {
        ExtractionContext {
            boundary,
            phase: Phase::Date,
            opened: false,
            date: String::new(),
            title: String::new(),
            section: String::new(),
            length: String::new(),
            // Leading space lets space-padded terms match at the very start.
            body: String::from(" "),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn publication(&self) -> &str {
        &self.boundary.publication
    }

    fn enter(&mut self, phase: Phase) {
        trace!(publication = %self.boundary.publication, %phase, "Entering phase");
        self.phase = phase;
        self.opened = false;
    }

    /// Consume one node.
    pub fn advance(mut self, node: &Node) -> Progress {
        match self.phase {
            Phase::Date => {
                if let Some(text) = node.text.as_deref().filter(|t| !is_line_break(t)) {
                    self.date.push_str(text);
                    if text.ends_with(self.boundary.format.date_terminator()) {
                        self.enter(Phase::Title);
                    }
                }
            }
            Phase::Title => {
                if !self.opened {
                    self.opened = node.has_value(TITLE_START);
                } else if node.has_value(TITLE_END) {
                    self.title = collapse_spaces(&self.title.replace(['\n', '\r'], " "))
                        .trim()
                        .to_string();
                    if self.boundary.format.has_section_marker() {
                        self.enter(Phase::Section);
                    } else {
                        self.enter(Phase::Length);
                    }
                } else if let Some(text) = node.text.as_deref() {
                    self.title.push_str(text);
                }
            }
            Phase::Section => {
                if !self.opened {
                    self.opened = node.has_value(SECTION_LABEL);
                } else if let Some(text) = captured_text(node) {
                    self.section.push_str(text);
                    self.enter(Phase::Length);
                }
            }
            Phase::Length => {
                if !self.opened {
                    self.opened = node.has_value(LENGTH_LABEL);
                } else if let Some(text) = captured_text(node) {
                    self.length.push_str(text);
                    self.enter(Phase::Body);
                }
            }
            Phase::Body => {
                if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty() && !is_line_break(t)) {
                    if text.eq_ignore_ascii_case(BODY_END) {
                        return Progress::Complete(self.finish());
                    }
                    self.body.push_str(&clean_body_fragment(text));
                    self.body.push(' ');
                }
            }
        }
        Progress::Pending(self)
    }

    fn finish(self) -> Result<ArticleRecord, ExtractError> {
        let date = parse_date(&self.date)?;
        let record = ArticleRecord {
            publication: self.boundary.publication,
            format: self.boundary.format,
            date,
            section: self.section,
            length: self.length,
            title: self.title,
            body: collapse_spaces(&self.body),
        };
        debug!(
            publication = %record.publication,
            date = %record.date,
            title = %truncate_for_log(&record.title, 80),
            "Extracted article"
        );
        Ok(record)
    }
}

/// A text fragment worth capturing as a single-value field.
fn captured_text(node: &Node) -> Option<&str> {
    node.text
        .as_deref()
        .filter(|t| !t.is_empty() && !is_line_break(t))
}

/// Replace quotes with spaces and split punctuation off the preceding word.
fn clean_body_fragment(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if QUOTES.contains(&c) {
            cleaned.push(' ');
        } else {
            if PUNCTUATION.contains(&c) {
                cleaned.push(' ');
            }
            cleaned.push(c);
        }
    }
    cleaned
}

/// Scanner state for one document.
#[derive(Debug)]
pub enum ScanState {
    Seeking,
    InArticle(ExtractionContext),
}

/// Feed one node to the scanner, possibly completing an article.
pub fn transition(
    state: ScanState,
    node: &Node,
    detector: &BoundaryDetector,
) -> (ScanState, Option<Result<ArticleRecord, ExtractError>>) {
    match state {
        ScanState::Seeking => match detector.detect(node) {
            Some(boundary) => (ScanState::InArticle(ExtractionContext::new(boundary)), None),
            None => (ScanState::Seeking, None),
        },
        ScanState::InArticle(ctx) => match ctx.advance(node) {
            Progress::Pending(ctx) => (ScanState::InArticle(ctx), None),
            Progress::Complete(result) => (ScanState::Seeking, Some(result)),
        },
    }
}

/// Iterator over the articles of one document.
///
/// Yields `Ok` for every completed article and `Err` for every article that
/// was dropped: a malformed date, or the document ending mid-article. An
/// article cut off by the end of the document is never emitted.
pub struct Articles<'a, I> {
    nodes: I,
    detector: &'a BoundaryDetector,
    state: ScanState,
    exhausted: bool,
}

impl<'a, I> Articles<'a, I>
where
    I: Iterator<Item = Node>,
{
    pub fn new(nodes: I, detector: &'a BoundaryDetector) -> Self {
        Articles {
            nodes,
            detector,
            state: ScanState::Seeking,
            exhausted: false,
        }
    }
}

impl<I> Iterator for Articles<'_, I>
where
    I: Iterator<Item = Node>,
{
    type Item = Result<ArticleRecord, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        for node in self.nodes.by_ref() {
            let state = std::mem::replace(&mut self.state, ScanState::Seeking);
            let (state, emitted) = transition(state, &node, self.detector);
            self.state = state;
            if emitted.is_some() {
                return emitted;
            }
        }
        self.exhausted = true;
        match std::mem::replace(&mut self.state, ScanState::Seeking) {
            ScanState::Seeking => None,
            ScanState::InArticle(ctx) => Some(Err(ExtractError::MarkerNotFound {
                publication: ctx.publication().to_string(),
                phase: ctx.phase(),
            })),
        }
    }
}
