//! Article extraction from LexisNexis HTML exports.
//!
//! Exports have no reliable structural tagging, so articles are found by
//! walking every node in document order and matching on content:
//!
//! 1. [`node`]: Flattens a parsed document into a [`node::NodeStream`]
//! 2. [`boundary`]: Recognises the node that opens an article
//! 3. [`machine`]: Reassembles date, title, section, length and body
//! 4. [`date`]: Parses the captured date line
//!
//! # Example
//!
//! ```ignore
//! let detector = BoundaryDetector::new(&config.publications);
//! for article in Articles::new(NodeStream::parse(&html), &detector) {
//!     match article {
//!         Ok(record) => count(record),
//!         Err(e) => warn!(error = %e, "Dropped article"),
//!     }
//! }
//! ```

pub mod boundary;
pub mod date;
pub mod machine;
pub mod node;
