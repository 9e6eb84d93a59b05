//! Row reconstruction.
//!
//! Content streams draw text in whatever order the exporter chose, so the
//! visual table has to be rebuilt from coordinates: tokens are sorted top to
//! bottom then left to right, and consecutive tokens whose baselines differ by
//! less than the tolerance are clustered into one row.

use crate::config::LayoutConfig;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::extractors::text::extract_page_tokens;
use crate::layout::token::{PositionedToken, Row};
use crate::utils::safe_float_cmp;

/// Cluster tokens from one page into rows.
///
/// # Examples
///
/// ```
/// use statsheet::layout::{group_rows, PositionedToken};
///
/// let tokens = vec![
///     PositionedToken::new("AB", 200.0, 699.0, 10.0),
///     PositionedToken::new("Name", 50.0, 700.0, 20.0),
///     PositionedToken::new("Smith", 50.0, 688.0, 20.0),
/// ];
/// let rows = group_rows(tokens, 3.0);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].text(), "Name AB");
/// ```
pub fn group_rows(mut tokens: Vec<PositionedToken>, tolerance: f32) -> Vec<Row> {
    tokens.sort_by(|a, b| safe_float_cmp(b.y, a.y).then_with(|| safe_float_cmp(a.x, b.x)));

    let mut rows: Vec<Row> = Vec::new();
    let mut last_y: Option<f32> = None;

    for token in tokens {
        let starts_row = match last_y {
            Some(prev) => (prev - token.y).abs() >= tolerance,
            None => true,
        };
        last_y = Some(token.y);

        if starts_row {
            rows.push(Row {
                y: token.y,
                tokens: vec![token],
            });
        } else if let Some(row) = rows.last_mut() {
            row.tokens.push(token);
        }
    }

    for row in &mut rows {
        row.tokens.sort_by(|a, b| safe_float_cmp(a.x, b.x));
    }
    rows
}

/// Extract rows from every page of a PDF, page by page.
///
/// # Errors
///
/// Fails when the bytes are not a readable PDF (bad header, no objects,
/// encrypted).
pub fn try_extract_rows(data: &[u8], config: &LayoutConfig) -> Result<Vec<Row>> {
    let doc = PdfDocument::from_bytes(data)?;
    let mut rows = Vec::new();
    for (index, page) in doc.pages().iter().enumerate() {
        let tokens = extract_page_tokens(&doc, page);
        log::debug!("page {}: {} tokens", index + 1, tokens.len());
        rows.extend(group_rows(tokens, config.row_tolerance));
    }
    Ok(rows)
}

/// Extract rows from a PDF, returning an empty list on any failure.
///
/// This is the boundary where unreadable documents stop being errors; the
/// reason is logged as a warning.
pub fn extract_rows(data: &[u8], config: &LayoutConfig) -> Vec<Row> {
    match try_extract_rows(data, config) {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("no rows extracted: {}", e);
            Vec::new()
        },
    }
}

/// Flatten rows to text: `\n` between rows, single spaces within a row.
pub fn rows_to_lines(rows: &[Row]) -> String {
    rows.iter().map(Row::text).collect::<Vec<_>>().join("\n")
}

/// Line-join variant of [`extract_rows`].
pub fn extract_lines(data: &[u8], config: &LayoutConfig) -> String {
    rows_to_lines(&extract_rows(data, config))
}
