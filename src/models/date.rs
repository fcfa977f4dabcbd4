//! Canonical date encoding
//!
//! Expense dates are stored as `YYYY-MM-DD` text. Lexicographic order of that
//! encoding equals chronological order, which the store relies on for its
//! "most recent first" ordering. Localized formats exist only at the UI
//! boundary and are converted here.

use chrono::NaiveDate;

/// Storage format for expense dates
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default display format (day/month/year)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a date stored in the canonical encoding.
///
/// This is the single parsing policy for aggregation and for validation: the
/// text must be exactly `YYYY-MM-DD`, with no surrounding whitespace. `None`
/// means the record is excluded from any date-based computation.
pub fn parse_canonical_date(text: &str) -> Option<NaiveDate> {
    if !has_canonical_shape(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, CANONICAL_DATE_FORMAT).ok()
}

/// Fixed-width layout check; chrono alone accepts signs, padding and
/// unpadded fields
fn has_canonical_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Encode a date in the canonical storage format
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Convert a canonical date to a display string using `format`.
///
/// Malformed stored dates are shown unchanged.
pub fn to_display_date(canonical: &str, format: &str) -> String {
    match parse_canonical_date(canonical) {
        Some(date) => date.format(format).to_string(),
        None => canonical.to_string(),
    }
}

/// Convert a user-facing date string in `format` to the canonical encoding
pub fn from_display_date(display: &str, format: &str) -> Option<String> {
    NaiveDate::parse_from_str(display.trim(), format)
        .ok()
        .map(format_canonical)
}
