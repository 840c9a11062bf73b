//! Conversion between the store's date strings and the display and input forms.
//!
//! The store holds dates as free text. Records created here use `YYYY-MM-DD`,
//! records seeded in the store may use `DD/MM/YYYY` or a full timestamp.

use chrono::{DateTime, NaiveDate};
use tracing::warn;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parse a stored date in any of the accepted shapes.
pub(crate) fn parse_wire_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(input, DISPLAY_FORMAT).ok()
}

/// Format a stored date as `DD/MM/YYYY` for display.
///
/// Returns an empty string when the date cannot be parsed.
pub fn format_display_date(wire: &str) -> String {
    match parse_wire_date(wire) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => {
            warn!(date = wire, "error formatting date: invalid date");
            String::new()
        }
    }
}

/// Turn a slash-separated day/month/year into hyphen-separated year-month-day.
///
/// The components are reversed as-is and not checked for being a real date.
/// Input without a slash comes back unchanged.
pub fn wire_to_input_date(wire: &str) -> String {
    wire.split('/').rev().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_iso_date() {
        assert_eq!(format_display_date("1990-05-12"), "12/05/1990");
    }

    #[test]
    fn test_display_from_timestamp() {
        assert_eq!(format_display_date("2024-01-15T08:30:00.000Z"), "15/01/2024");
    }

    #[test]
    fn test_display_from_slash_form() {
        assert_eq!(format_display_date("03/11/1970"), "03/11/1970");
    }

    #[test]
    fn test_display_invalid_is_empty() {
        assert_eq!(format_display_date("not a date"), "");
        assert_eq!(format_display_date(""), "");
        assert_eq!(format_display_date("1990-13-45"), "");
    }

    #[test]
    fn test_wire_to_input_reverses_slashes() {
        assert_eq!(wire_to_input_date("12/05/1990"), "1990-05-12");
    }

    #[test]
    fn test_wire_to_input_leaves_iso_alone() {
        assert_eq!(wire_to_input_date("1990-05-12"), "1990-05-12");
    }

    #[test]
    fn test_wire_to_input_does_not_validate() {
        assert_eq!(wire_to_input_date("99/99/2000"), "2000-99-99");
        assert_eq!(wire_to_input_date("a/b"), "b-a");
    }
}
