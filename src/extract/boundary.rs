//! Article boundary detection.
//!
//! LexisNexis exports name the publication right before each article's
//! date line. While the state machine is seeking, every node is offered to
//! [`BoundaryDetector::detect`]; the first node whose attribute value or
//! text matches a configured publication opens a new article.

use crate::models::{Publication, PublicationFormat};
use crate::extract::node::Node;
use tracing::debug;

/// The publication that opened an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Configured identifier, in its configured spelling.
    pub publication: String,
    pub format: PublicationFormat,
}

/// Single lookup from publication identifier to format.
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    publications: Vec<Publication>,
}

impl BoundaryDetector {
    pub fn new(publications: &[Publication]) -> Self {
        BoundaryDetector {
            publications: publications.to_vec(),
        }
    }

    /// Check whether `node` opens an article.
    ///
    /// Matching is exact apart from ASCII case. Several identifiers may map
    /// to the same format (the Daily Mail and the Mail on Sunday share one).
    pub fn detect(&self, node: &Node) -> Option<Boundary> {
        let publication = node.values().find_map(|value| {
            self.publications
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(value))
        })?;
        debug!(publication = %publication.name, tag = %node.tag, "Article boundary");
        Some(Boundary {
            publication: publication.name.clone(),
            format: publication.format,
        })
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }
}
