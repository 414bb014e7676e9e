//! Calendar date wire format
//!
//! Dates travel as plain `YYYY-MM-DD` strings with no time or offset, so the
//! day a user picks is the day the service stores regardless of local zone.

use chrono::{Datelike, NaiveDate};

/// Format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats accepted from user input, tried in order
pub const INPUT_FORMATS: &[&str] = &[
	"%Y-%m-%d",  // 2025-01-15
	"%d/%m/%Y",  // 15/01/2025
	"%d-%m-%Y",  // 15-01-2025
	"%d %b %Y",  // 15 Jan 2025
	"%b %d, %Y", // Jan 15, 2025
];

/// Render a date in wire format
pub fn format_date(date: NaiveDate) -> String {
	date.format(DATE_FORMAT).to_string()
}

/// Parse user input into a date.
///
/// Years outside 1000..=9999 are rejected to avoid two-digit year guesses.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
	let input = input.trim();
	INPUT_FORMATS.iter().find_map(|format| {
		NaiveDate::parse_from_str(input, format)
			.ok()
			.filter(|date| (1000..=9999).contains(&date.year()))
	})
}
