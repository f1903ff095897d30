//! Parsing of the captured date line.
//!
//! The line looks like `"June 5, 2015 Friday"` or, for Guardian exports,
//! `"June 5, 2015 Friday 11:30 PM GMT"`. Only month, day and year are
//! used; the weekday only served to end the capture.

use crate::errors::ExtractError;
use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse `"<Month> <Day>, <Year> <Weekday>..."` into a date.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] when either split yields fewer than two
/// parts, the month name is unknown, day or year are not integers, or the
/// combination is not a real date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ExtractError> {
    let fail = |reason: &str| ExtractError::Parse {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = raw.trim().split(", ").collect();
    if parts.len() < 2 {
        return Err(fail("expected \"<month> <day>, <year>\""));
    }
    let month_day: Vec<&str> = parts[0].split(' ').collect();
    if month_day.len() < 2 {
        return Err(fail("expected \"<month> <day>\" before the comma"));
    }
    let year_rest: Vec<&str> = parts[1].split(' ').collect();

    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month_day[0]))
        .ok_or_else(|| fail("unknown month"))?;
    let day: u32 = month_day[1]
        .parse()
        .map_err(|_| fail("day of month is not a number"))?;
    let year: i32 = year_rest[0]
        .parse()
        .map_err(|_| fail("year is not a number"))?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, day).ok_or_else(|| fail("no such date"))
}
