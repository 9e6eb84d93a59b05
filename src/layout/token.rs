//! Positioned text tokens and the rows they form.

use serde::Serialize;

/// A run of text at a position on the page, in PDF user space (y grows
/// upwards).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedToken {
    /// Decoded text
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Advance width of the whole run
    pub width: f32,
}

impl PositionedToken {
    /// Create a token.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Tokens sharing a baseline within the row tolerance, left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    /// Baseline of the first token of the row
    pub y: f32,
    /// Tokens ordered by ascending x
    pub tokens: Vec<PositionedToken>,
}

impl Row {
    /// Token texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Token texts joined with single spaces.
    ///
    /// ```
    /// use statsheet::layout::{PositionedToken, Row};
    ///
    /// let row = Row {
    ///     y: 700.0,
    ///     tokens: vec![PositionedToken::new("12", 40.0, 700.0, 8.0), PositionedToken::new("Smith", 60.0, 700.0, 20.0)],
    /// };
    /// assert_eq!(row.text(), "12 Smith");
    /// ```
    pub fn text(&self) -> String {
        self.texts().join(" ")
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the row has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
