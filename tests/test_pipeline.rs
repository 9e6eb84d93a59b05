//! End-to-end tests: PDF bytes and a roster in, a display sheet out.

use statsheet::config::ExtractionProfile;
use statsheet::error::{Error, ParseWarning};
use statsheet::matcher::MatchKind;
use statsheet::pipeline::{build, sheet_from_pdf, DisplayRow, StatSource};
use statsheet::records::{RosterPlayer, Sport};
use statsheet::selector::CatValue;
use statsheet::source::{fetch_first_valid, looks_like_pdf, FileFetcher};
use std::fs;

fn cell(text: &str, x: f32, y: f32) -> String {
    format!("BT /F1 9 Tf 1 0 0 1 {} {} Tm ({}) Tj ET\n", x, y, text)
}

fn single_page_pdf(content: &str) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [4 0 R] /Count 1 >> endobj\n");
    out.extend_from_slice(b"3 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n");
    out.extend_from_slice(
        b"4 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 792 612] \
          /Resources << /Font << /F1 3 0 R >> >> /Contents 5 0 R >> endobj\n",
    );
    out.extend_from_slice(format!("5 0 obj << /Length {} >>\nstream\n", content.len()).as_bytes());
    out.extend_from_slice(content.as_bytes());
    out.extend_from_slice(b"\nendstream\nendobj\ntrailer << /Root 1 0 R >>\n%%EOF\n");
    out
}

fn soccer_sheet() -> Vec<u8> {
    let header = [("#", 25.0), ("Player", 45.0), ("GP-GS", 150.0), ("G", 190.0), ("A", 215.0), ("PTS", 240.0), ("SH", 265.0), ("SOG", 320.0)];
    let ruiz = [("9", 25.0), ("Ruiz, Eva", 45.0), ("12-12", 150.0), ("7", 190.0), ("3", 215.0), ("17", 240.0), ("30", 265.0), ("18", 320.0)];
    let park = [("1", 25.0), ("Park, Jo", 45.0), ("12-12", 150.0), ("0", 190.0), ("0", 215.0), ("0", 240.0)];
    let total = [("Totals", 45.0), ("12-12", 150.0), ("7", 190.0), ("3", 215.0), ("17", 240.0)];

    let mut content = String::new();
    for (y, cells) in [(700.0, &header[..]), (690.0, &ruiz[..]), (680.0, &park[..]), (670.0, &total[..])] {
        for (text, x) in cells {
            content.push_str(&cell(text, *x, y));
        }
    }
    single_page_pdf(&content)
}

fn roster() -> Vec<RosterPlayer> {
    vec![
        RosterPlayer::new("9", "Eva", "Ruiz"),
        RosterPlayer::new("1", "Jo", "Park"),
        RosterPlayer::new("40", "Walk", "On"),
    ]
}

#[test]
fn test_soccer_pdf_to_sheet() {
    let profile = ExtractionProfile::new(Sport::Soccer);
    let sheet = sheet_from_pdf(&roster(), &soccer_sheet(), &profile);
    assert!(sheet.warnings.is_empty(), "{:?}", sheet.warnings);
    assert_eq!(sheet.athletes().count(), 3);
    assert!(sheet.inactive.is_empty());

    let ruiz = sheet.slot(9).unwrap();
    assert_eq!(ruiz.name, "Eva Ruiz");
    assert_eq!(ruiz.match_kind, Some(MatchKind::Jersey));
    let picked: Vec<(&str, &CatValue)> = ruiz.stats.iter().map(|s| (s.label.as_str(), &s.value)).collect();
    assert_eq!(
        picked,
        vec![
            ("Goals", &CatValue::Number(7.0)),
            ("Assists", &CatValue::Number(3.0)),
            ("Pts", &CatValue::Number(17.0)),
        ]
    );

    // Matched, but nothing non-zero to show.
    let park = sheet.slot(1).unwrap();
    assert!(park.match_kind.is_some());
    assert!(!park.has_stats());
    assert_eq!(park.stats.len(), profile.columns);

    assert!(sheet.slot(40).unwrap().match_kind.is_none());
}

#[test]
fn test_sheet_rows_collapse_empty_runs() {
    let profile = ExtractionProfile::new(Sport::Soccer);
    let sheet = sheet_from_pdf(&roster(), &soccer_sheet(), &profile);
    assert!(matches!(sheet.rows[0], DisplayRow::Athlete(ref a) if a.slot == Some(1)));
    assert_eq!(sheet.rows[1], DisplayRow::Gap { count: 7, start_row: 2 });
    assert!(matches!(sheet.rows[2], DisplayRow::Athlete(ref a) if a.slot == Some(9)));
    assert_eq!(sheet.rows[3], DisplayRow::Gap { count: 30, start_row: 10 });
}

#[test]
fn test_unreadable_pdf_keeps_roster() {
    let profile = ExtractionProfile::new(Sport::Soccer);
    let html = b"<html><body>Service Unavailable</body></html>";
    let sheet = sheet_from_pdf(&roster(), html, &profile);
    assert_eq!(sheet.athletes().count(), 3);
    assert!(sheet.athletes().all(|a| !a.has_stats()));
    assert!(matches!(sheet.warnings[0], ParseWarning::MalformedDocument { .. }));
}

#[test]
fn test_sheet_serializes_row_kinds() {
    let profile = ExtractionProfile::new(Sport::Soccer);
    let sheet = build(&roster(), StatSource::Pdf(&soccer_sheet()), &profile).unwrap();
    let json: serde_json::Value = serde_json::to_value(&sheet).unwrap();
    assert_eq!(json["sport"], "soccer");
    assert_eq!(json["rows"][0]["kind"], "athlete");
    assert_eq!(json["rows"][1]["kind"], "gap");
    assert_eq!(json["rows"][1]["count"], 7);
}

#[test]
fn test_first_valid_candidate_wins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("error.pdf"), b"<!DOCTYPE html><html>404</html>").unwrap();
    fs::write(dir.path().join("last_season.pdf"), soccer_sheet()).unwrap();

    let fetcher = FileFetcher::with_base(dir.path());
    let candidates = vec![
        "this_season.pdf".to_string(),
        "error.pdf".to_string(),
        "last_season.pdf".to_string(),
    ];
    let (location, bytes) = fetch_first_valid(&fetcher, &candidates, looks_like_pdf).unwrap();
    assert_eq!(location, "last_season.pdf");

    let sheet = sheet_from_pdf(&roster(), &bytes, &ExtractionProfile::new(Sport::Soccer));
    assert!(sheet.slot(9).unwrap().has_stats());
}

#[test]
fn test_no_valid_candidate() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("error.pdf"), b"<html></html>").unwrap();
    let fetcher = FileFetcher::with_base(dir.path());
    let candidates = vec!["missing.pdf".to_string(), "error.pdf".to_string()];
    match fetch_first_valid(&fetcher, &candidates, looks_like_pdf) {
        Err(Error::SourceUnavailable { tried, last }) => {
            assert_eq!(tried, 2);
            assert!(last.contains("error.pdf"));
        },
        other => panic!("expected SourceUnavailable, got {:?}", other.map(|(l, _)| l)),
    }
}
