//! Substring-based term counting.
//!
//! Each literal alternative of a term is counted as written and again with
//! its first character capitalised, to pick up sentence-initial uses. Both
//! passes always run and are summed, so a literal that already starts with
//! a capital is counted twice per occurrence.
//!
//! Matching is plain substring search: `"war"` also counts inside
//! `"warning"`. Terms that need whole-word matching are padded with spaces
//! in configuration (`"Syria "`), which works because bodies have
//! punctuation split off and a leading space added during extraction.

use crate::models::TermDefinition;
use crate::utils::upcase;

/// Number of times `term` occurs in `body`, summed over its alternatives.
pub fn count(term: &TermDefinition, body: &str) -> u64 {
    term.alternatives
        .iter()
        .map(|literal| count_literal(literal, body))
        .sum()
}

/// True when `term` occurs at least once in `body`.
pub fn contains(term: &TermDefinition, body: &str) -> bool {
    count(term, body) > 0
}

fn count_literal(literal: &str, body: &str) -> u64 {
    if literal.is_empty() {
        return 0;
    }
    occurrences(literal, body) + occurrences(&upcase(literal), body)
}

/// Segments produced by splitting on `literal`, minus one.
fn occurrences(literal: &str, body: &str) -> u64 {
    (body.split(literal).count() - 1) as u64
}
