//! Utility functions for string normalisation and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace collapsing for titles and bodies
//! - First-letter capitalisation for sentence-initial term matching
//! - String truncation for logging and file-name sanitising
//! - File system validation for the output directory

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, instrument};

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(" {2,}").expect("static regex"));

/// Collapse every run of consecutive spaces into a single space.
///
/// Only the space character is touched; tabs and newlines are left alone.
pub fn collapse_spaces(s: &str) -> String {
    SPACE_RUN.replace_all(s, " ").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes, with an ellipsis and the dropped byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Capitalize the first character of a string.
///
/// Used to build the sentence-initial variant of a term (`"refugee"` ->
/// `"Refugee"`). Leading spaces are not skipped, so `" refugee"` is
/// returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(upcase("hello"), "Hello");
/// assert_eq!(upcase(""), "");
/// ```
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Turn a term into something safe to embed in a file name.
///
/// Alphanumeric characters are kept, runs of anything else become a single
/// underscore, and leading/trailing underscores are dropped.
pub fn file_safe(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn ensure_writable_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    let probe_path = path.join("..__probe_write__");
    fs::File::create(&probe_path)?;
    let _ = fs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
