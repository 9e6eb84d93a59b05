//! Cell-level readers shared by the sport parsers.
//!
//! Stat sheets print missing values as `-`, `--` or nothing at all; every
//! reader maps those to `None` rather than zero.

use crate::layout::{FieldRange, Row};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref JERSEY: Regex = Regex::new(r"^#?(\d{1,2})$").unwrap();
    static ref NUMERIC: Regex = Regex::new(r"^(-?[\d.,]+%?(-[\d.,]+)*|-+|\d+/\d+)$").unwrap();
    static ref SUMMARY: Regex =
        Regex::new(r"(?i)^(#?\s*)?(totals?|opponents?|opp\.?|team|tm)\b").unwrap();
}

fn is_blank(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t.chars().all(|c| c == '-')
}

/// Unsigned count; thousands separators are ignored.
pub fn count(text: &str) -> Option<u32> {
    if is_blank(text) {
        return None;
    }
    text.trim().replace(',', "").parse().ok()
}

/// Signed yardage.
pub fn yards(text: &str) -> Option<i32> {
    if is_blank(text) {
        return None;
    }
    text.trim()
        .trim_end_matches(|c: char| c == 't' || c == 'T')
        .replace(',', "")
        .parse()
        .ok()
}

/// Decimal value (`.345`, `4.50`, `38.5%`).
pub fn decimal(text: &str) -> Option<f64> {
    if is_blank(text) {
        return None;
    }
    text.trim().trim_end_matches('%').replace(',', "").parse().ok()
}

/// Percentage on a 0-100 scale. Values printed as a fraction (`.456`) are
/// scaled up.
pub fn percent(text: &str) -> Option<f64> {
    let value = decimal(text)?;
    if text.trim().starts_with('.') || (value <= 1.0 && text.contains('.') && !text.contains('%')) {
        Some(crate::records::round1(value * 100.0))
    } else {
        Some(value)
    }
}

/// Dash-separated pair (`10-8`, `45-100`). Either half may be missing.
pub fn pair(text: &str) -> (Option<u32>, Option<u32>) {
    match text.trim().split_once('-') {
        Some((a, b)) => (count(a), count(b)),
        None => (count(text), None),
    }
}

/// Dash-separated triple (`5-3-1`).
pub fn triple(text: &str) -> (Option<u32>, Option<u32>, Option<u32>) {
    let mut parts = text.trim().splitn(3, '-');
    let a = parts.next().and_then(count);
    let b = parts.next().and_then(count);
    let c = parts.next().and_then(count);
    (a, b, c)
}

/// Leading count of a slash pair (`1/0` shutouts are combined/individual).
pub fn leading_count(text: &str) -> Option<u32> {
    count(text.split('/').next().unwrap_or(text))
}

/// Normalize a printed jersey: `#07` → `07`, non-jerseys → `None`.
pub fn jersey(text: &str) -> Option<String> {
    JERSEY.captures(text.trim()).map(|c| c[1].to_string())
}

/// Whether a token reads as a stat value rather than part of a name.
pub fn is_numeric(token: &str) -> bool {
    NUMERIC.is_match(token)
}

/// Totals, opponents and team lines.
pub fn is_summary(text: &str) -> bool {
    SUMMARY.is_match(text.trim())
}

/// All tokens inside a range joined with spaces. Names often arrive as
/// several tokens, where the column mapper keeps only the first.
pub fn joined_text(row: &Row, range: &FieldRange) -> String {
    row.tokens
        .iter()
        .filter(|t| range.contains(t.x))
        .map(|t| t.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased words of a row, for header detection.
pub fn header_words(row: &Row) -> Vec<String> {
    row.tokens
        .iter()
        .flat_map(|t| t.text.split_whitespace())
        .map(|w| w.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_blanks() {
        assert_eq!(count("12"), Some(12));
        assert_eq!(count("1,204"), Some(1204));
        assert_eq!(count("-"), None);
        assert_eq!(count("--"), None);
        assert_eq!(count(""), None);
        assert_eq!(yards("-12"), Some(-12));
        assert_eq!(yards("75t"), Some(75));
    }

    #[test]
    fn test_percent_scale() {
        assert_eq!(percent(".456"), Some(45.6));
        assert_eq!(percent("45.6"), Some(45.6));
        assert_eq!(percent("1.000"), Some(100.0));
        assert_eq!(percent("38.5%"), Some(38.5));
    }

    #[test]
    fn test_pairs() {
        assert_eq!(pair("10-8"), (Some(10), Some(8)));
        assert_eq!(pair("7"), (Some(7), None));
        assert_eq!(triple("5-3-1"), (Some(5), Some(3), Some(1)));
        assert_eq!(leading_count("1/0"), Some(1));
    }

    #[test]
    fn test_jersey_and_summary() {
        assert_eq!(jersey("#7").as_deref(), Some("7"));
        assert_eq!(jersey("00").as_deref(), Some("00"));
        assert_eq!(jersey("150"), None);
        assert_eq!(jersey("Smith"), None);
        assert!(is_summary("Totals 45 1234"));
        assert!(is_summary("Opponents"));
        assert!(is_summary("TEAM"));
        assert!(!is_summary("Teamer, Joe"));
    }

    #[test]
    fn test_numeric_tokens() {
        assert!(is_numeric("12"));
        assert!(is_numeric(".345"));
        assert!(is_numeric("10-8"));
        assert!(is_numeric("5-3-1"));
        assert!(is_numeric("-12"));
        assert!(is_numeric("-"));
        assert!(is_numeric("1/0"));
        assert!(!is_numeric("Smith,"));
        assert!(!is_numeric("Jr."));
    }
}
