//! Term counting and aggregation over extracted articles.
//!
//! # Submodules
//!
//! - [`counter`]: Counts one term in one body (pure)
//! - [`aggregate`]: Per-term, per-weekday and per-publication tallies that
//!   merge file by file
//! - [`headlines`]: Optional listing of articles mentioning a headline term
//!   on a given weekday

pub mod aggregate;
pub mod counter;
pub mod headlines;
