//! Generic column mapper.
//!
//! Stat sheets keep each column as its own token, so a row can be read by
//! checking which x range each token's left edge falls in. The ranges are
//! calibrated per document family and live in [`crate::config`].

use crate::layout::token::Row;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named half-open x range `[x_min, x_max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    /// Field name
    pub field: String,
    /// Inclusive lower bound
    pub x_min: f32,
    /// Exclusive upper bound
    pub x_max: f32,
}

impl FieldRange {
    /// Create a range.
    pub fn new(field: impl Into<String>, x_min: f32, x_max: f32) -> Self {
        Self {
            field: field.into(),
            x_min,
            x_max,
        }
    }

    /// True when `x` is in `[x_min, x_max)`.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.x_min && x < self.x_max
    }
}

/// Field values read from one row, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRow {
    values: IndexMap<String, String>,
}

impl MappedRow {
    /// Value of a field; empty when the field is unknown or had no token.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Iterate `(field, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }
}

/// Assign row tokens to fields.
///
/// Each field takes the first token (left to right) whose x falls in its
/// range, or the empty string. Values are not validated.
///
/// # Examples
///
/// ```
/// use statsheet::layout::{map_row, FieldRange, PositionedToken, Row};
///
/// let row = Row {
///     y: 500.0,
///     tokens: vec![PositionedToken::new("7", 30.0, 500.0, 5.0), PositionedToken::new("12", 210.0, 500.0, 8.0)],
/// };
/// let ranges = vec![FieldRange::new("jersey", 20.0, 40.0), FieldRange::new("gp", 200.0, 230.0), FieldRange::new("pts", 230.0, 260.0)];
/// let mapped = map_row(&row, &ranges);
/// assert_eq!(mapped.get("jersey"), "7");
/// assert_eq!(mapped.get("gp"), "12");
/// assert_eq!(mapped.get("pts"), "");
/// ```
pub fn map_row(row: &Row, ranges: &[FieldRange]) -> MappedRow {
    let values = ranges
        .iter()
        .map(|range| {
            let value = row
                .tokens
                .iter()
                .find(|t| range.contains(t.x))
                .map(|t| t.text.clone())
                .unwrap_or_default();
            (range.field.clone(), value)
        })
        .collect();
    MappedRow { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::token::PositionedToken;

    #[test]
    fn test_half_open_bounds() {
        let range = FieldRange::new("x", 10.0, 20.0);
        assert!(range.contains(10.0));
        assert!(!range.contains(20.0));
    }

    #[test]
    fn test_first_token_in_range_wins() {
        let row = Row {
            y: 0.0,
            tokens: vec![
                PositionedToken::new("first", 11.0, 0.0, 1.0),
                PositionedToken::new("second", 15.0, 0.0, 1.0),
            ],
        };
        let mapped = map_row(&row, &[FieldRange::new("f", 10.0, 20.0)]);
        assert_eq!(mapped.get("f"), "first");
    }

    #[test]
    fn test_overlapping_ranges_share_a_token() {
        let row = Row {
            y: 0.0,
            tokens: vec![PositionedToken::new("5", 15.0, 0.0, 1.0)],
        };
        let mapped = map_row(
            &row,
            &[FieldRange::new("a", 10.0, 20.0), FieldRange::new("b", 14.0, 30.0)],
        );
        assert_eq!(mapped.get("a"), "5");
        assert_eq!(mapped.get("b"), "5");
        assert_eq!(mapped.iter().count(), 2);
    }

    #[test]
    fn test_blank_and_unknown_field() {
        let mapped = map_row(&Row::default(), &[FieldRange::new("a", 0.0, 1.0)]);
        assert!(mapped.is_blank());
        assert_eq!(mapped.get("missing"), "");
    }
}
