//! Integration tests for row extraction from real (in-memory) PDF bytes.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use statsheet::config::{builtin_table, LayoutConfig, TableKey};
use statsheet::error::Error;
use statsheet::layout::{extract_lines, extract_rows, map_row, try_extract_rows};
use std::io::Write;

// ============================================================================
// Helper Functions for Building PDFs
// ============================================================================

/// One positioned cell as a content stream fragment.
fn cell(text: &str, x: f32, y: f32) -> String {
    format!("BT /F1 9 Tf 1 0 0 1 {} {} Tm ({}) Tj ET\n", x, y, text)
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Build a PDF with one page per content string.
fn build_pdf(pages: &[String], compress: bool, trailer_extra: &str) -> Vec<u8> {
    let mut out = b"%PDF-1.5\n".to_vec();
    let first_page = 4;
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", first_page + 2 * i)).collect();

    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    out.extend_from_slice(
        format!("2 0 obj << /Type /Pages /Kids [{}] /Count {} >> endobj\n", kids.join(" "), pages.len()).as_bytes(),
    );
    out.extend_from_slice(b"3 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n");

    for (i, content) in pages.iter().enumerate() {
        let page_id = first_page + 2 * i;
        let content_id = page_id + 1;
        out.extend_from_slice(
            format!(
                "{} 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 792 612] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >> endobj\n",
                page_id, content_id
            )
            .as_bytes(),
        );
        let (data, filter) = if compress {
            (deflate(content.as_bytes()), " /Filter /FlateDecode")
        } else {
            (content.as_bytes().to_vec(), "")
        };
        out.extend_from_slice(format!("{} 0 obj << /Length {}{} >>\nstream\n", content_id, data.len(), filter).as_bytes());
        out.extend_from_slice(&data);
        out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    out.extend_from_slice(format!("trailer << /Root 1 0 R {}>>\n%%EOF\n", trailer_extra).as_bytes());
    out
}

fn soccer_page() -> String {
    let mut content = String::new();
    // Drawn out of order on purpose.
    content.push_str(&cell("17", 240.0, 690.0));
    content.push_str(&cell("9", 25.0, 690.0));
    content.push_str(&cell("Ruiz, Eva", 45.0, 690.5));
    content.push_str(&cell("12-12", 150.0, 690.0));
    content.push_str(&cell("7", 190.0, 689.0));
    content.push_str(&cell("3", 215.0, 690.0));
    content.push_str(&cell("#", 25.0, 700.0));
    content.push_str(&cell("Player", 45.0, 700.0));
    content.push_str(&cell("GP-GS", 150.0, 700.0));
    content
}

// ============================================================================
// Row Extraction
// ============================================================================

#[test]
fn test_rows_are_top_to_bottom_left_to_right() {
    let pdf = build_pdf(&[soccer_page()], false, "");
    let rows = extract_rows(&pdf, &LayoutConfig::default());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].texts(), vec!["#", "Player", "GP-GS"]);
    assert_eq!(rows[1].texts(), vec!["9", "Ruiz, Eva", "12-12", "7", "3", "17"]);
}

#[test]
fn test_flate_content_matches_plain() {
    let plain = build_pdf(&[soccer_page()], false, "");
    let packed = build_pdf(&[soccer_page()], true, "");
    let config = LayoutConfig::default();
    assert_eq!(extract_lines(&plain, &config), extract_lines(&packed, &config));
    assert!(!extract_lines(&packed, &config).is_empty());
}

#[test]
fn test_pages_are_concatenated_in_order() {
    let page_two = cell("2", 25.0, 700.0) + &cell("Second", 45.0, 700.0);
    let page_one = cell("1", 25.0, 100.0) + &cell("First", 45.0, 100.0);
    let pdf = build_pdf(&[page_one, page_two], true, "");
    let lines = extract_lines(&pdf, &LayoutConfig::default());
    assert_eq!(lines, "1 First\n2 Second");
}

#[test]
fn test_tighter_tolerance_splits_rows() {
    let pdf = build_pdf(&[soccer_page()], false, "");
    let loose = extract_rows(&pdf, &LayoutConfig::new(3.0).unwrap());
    let tight = extract_rows(&pdf, &LayoutConfig::new(0.5).unwrap());
    assert_eq!(loose.len(), 2);
    assert!(tight.len() > loose.len());
}

#[test]
fn test_mapped_row_uses_builtin_table() {
    let pdf = build_pdf(&[soccer_page()], false, "");
    let rows = extract_rows(&pdf, &LayoutConfig::default());
    let mapped = map_row(&rows[1], &builtin_table(TableKey::SoccerField).ranges);
    assert_eq!(mapped.get("jersey"), "9");
    assert_eq!(mapped.get("name"), "Ruiz, Eva");
    assert_eq!(mapped.get("g"), "7");
    assert_eq!(mapped.get("pts"), "17");
    assert_eq!(mapped.get("sog"), "");
}

// ============================================================================
// Unreadable Documents
// ============================================================================

#[test]
fn test_encrypted_document_yields_nothing() {
    let pdf = build_pdf(&[soccer_page()], false, "/Encrypt 9 0 R ");
    assert!(matches!(try_extract_rows(&pdf, &LayoutConfig::default()), Err(Error::Encrypted)));
    assert!(extract_rows(&pdf, &LayoutConfig::default()).is_empty());
}

#[test]
fn test_html_error_page_yields_nothing() {
    let html = b"<!DOCTYPE html><html><body>404 Not Found</body></html>";
    assert!(matches!(try_extract_rows(html, &LayoutConfig::default()), Err(Error::InvalidHeader(_))));
    assert!(extract_rows(html, &LayoutConfig::default()).is_empty());
}

#[test]
fn test_page_without_text() {
    let pdf = build_pdf(&["0 0 m 100 100 l S".to_string()], false, "");
    assert!(extract_rows(&pdf, &LayoutConfig::default()).is_empty());
}
