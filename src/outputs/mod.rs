//! Report generation for each (date window, collection) pair.
//!
//! # Submodules
//!
//! - [`reports`]: Writes the term counts CSV and the optional headline CSV
//! - [`json`]: Writes a JSON summary of what was read and counted
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── 2015-06-01_2015-08-31/
//!     ├── GuardianCounts.csv
//!     ├── GuardianHeadlinesForArticlesContaining_Syria.csv
//!     └── GuardianSummary.json
//! ```

pub mod json;
pub mod reports;
