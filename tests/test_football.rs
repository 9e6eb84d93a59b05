//! Integration tests for football sheets: section parsing, category
//! selection and the padded display row.

use statsheet::config::ExtractionProfile;
use statsheet::parsers::football::parse_lines;
use statsheet::pipeline::sheet_from_records;
use statsheet::records::{FootballStats, RawStatRecord, RosterPlayer, Sport, SportStats};
use statsheet::selector::football::select;
use statsheet::selector::{CatValue, FootballCategory, FOOTBALL_COLUMNS};

const SHEET: &[&str] = &[
    "Team rushing offense improved again this year",
    "Rushing gp att gain loss net avg td long avg/g",
    "21 Cole, Ben 8 5 30 2 28 5.6 0 12 3.5",
    "7 Ortiz, Sam 11 40 200 30 170 4.3 2 25 15.5 Passing gp effic cmp-att-int pct yds td lng avg/g",
    "7 Ortiz, Sam 11 140.2 150-240-6 62.5 1800 14 70 163.6",
    "Total 11 150-240-6 62.5 1800 14 70 163.6",
    "Receiving gp no yds avg td long avg/g",
    "21 Cole, Ben 8 2 25 12.5 0 15 3.1",
    "All-purpose gp rush rec pr kr ir total avg/g",
    "21 Cole, Ben 8 28 25 0 0 0 53 6.6",
    "Scoring td fg kick rush rcv pass dxp saf pts",
    "39 Berg, Ola 0 12 30-32 0 0 0 0 0 66",
    "Field goals fgm-fga pct 01-19 20-29 30-39 40-49 50-99 lg",
    "39 Berg, Ola 12-15 80.0 0-0 4-4 5-6 3-5 0-0 47",
    "Punt returns no yds avg td long",
    "3 Fox, Eli 6 40 6.7 0 15",
    "Defense gp solo ast total tfl-yds sacks-yds int-yds brup qbh ff fr",
    "44 Hale, Ty 12 40 35 75 9.5-40 0-0 0-0 3 6 2 1",
];

fn records() -> Vec<RawStatRecord> {
    let report = parse_lines(SHEET.iter().copied());
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    report.records
}

fn stats_of<'a>(records: &'a [RawStatRecord], name: &str) -> &'a FootballStats {
    let record = records.iter().find(|r| r.name == name).unwrap_or_else(|| panic!("no record for {}", name));
    match &record.stats {
        SportStats::Football(f) => f,
        other => panic!("unexpected {:?}", other),
    }
}

fn labels(stats: &[statsheet::selector::CatStat]) -> Vec<&str> {
    stats.iter().map(|s| s.label.as_str()).collect()
}

#[test]
fn test_one_record_per_athlete() {
    let records = records();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Cole, Ben", "Ortiz, Sam", "Berg, Ola", "Fox, Eli", "Hale, Ty"]);

    let cole = stats_of(&records, "Cole, Ben");
    assert_eq!(cole.rushing.as_ref().unwrap().att, Some(5));
    assert_eq!(cole.receiving.as_ref().unwrap().no, Some(2));
    assert!(cole.scoring.is_none());
}

#[test]
fn test_prose_mention_does_not_open_a_section() {
    let report = parse_lines(["Team rushing offense improved", "21 Cole, Ben 8 5 30 2 28 5.6 0 12 3.5"]);
    assert!(report.records.is_empty());
}

#[test]
fn test_glued_header_splits_rushing_and_passing() {
    let records = records();
    let ortiz = stats_of(&records, "Ortiz, Sam");
    assert_eq!(ortiz.rushing.as_ref().unwrap().net, Some(170));
    let passing = ortiz.passing.as_ref().unwrap();
    assert_eq!((passing.cmp, passing.att, passing.int), (Some(150), Some(240), Some(6)));
}

#[test]
fn test_rusher_with_a_few_catches() {
    let records = records();
    let selection = select(stats_of(&records, "Cole, Ben"));
    assert_eq!(selection.category, Some(FootballCategory::Rushing));
    // TD is zero and drops out.
    assert_eq!(labels(&selection.stats), vec!["Att", "Yds", "Avg", "Long", ""]);
    assert_eq!(selection.stats[1].value, CatValue::Number(28.0));
    assert_eq!(selection.stats[4].value, CatValue::Blank);
}

#[test]
fn test_passer() {
    let records = records();
    let selection = select(stats_of(&records, "Ortiz, Sam"));
    assert_eq!(selection.category, Some(FootballCategory::Passing));
    assert_eq!(selection.stats[0].value, CatValue::Text("150-240".to_string()));
    assert_eq!(labels(&selection.stats), vec!["Cmp-Att", "Yds", "TD", "INT", "Pct"]);
}

#[test]
fn test_kicker_combines_field_goals_and_scoring() {
    let records = records();
    let selection = select(stats_of(&records, "Berg, Ola"));
    assert_eq!(selection.category, Some(FootballCategory::Kicking));
    assert_eq!(selection.stats[0].value, CatValue::Text("12-15".to_string()));
    assert_eq!(selection.stats[3].value, CatValue::Text("30-32".to_string()));
    assert_eq!(selection.stats[4].value, CatValue::Number(66.0));
}

#[test]
fn test_defender_drops_zero_columns() {
    let records = records();
    let selection = select(stats_of(&records, "Hale, Ty"));
    assert_eq!(selection.category, Some(FootballCategory::Defense));
    assert_eq!(labels(&selection.stats), vec!["Tot", "Solo", "TFL", "", ""]);
}

#[test]
fn test_returner_has_no_category() {
    let records = records();
    let selection = select(stats_of(&records, "Fox, Eli"));
    assert_eq!(selection.category, None);
    assert_eq!(selection.stats.len(), FOOTBALL_COLUMNS);
    assert!(selection.stats.iter().all(|s| s.is_blank()));
}

#[test]
fn test_football_sheet_is_five_wide() {
    let roster = vec![
        RosterPlayer::new("21", "Ben", "Cole"),
        RosterPlayer::new("7", "Sam", "Ortiz"),
        RosterPlayer::new("3", "Eli", "Fox"),
    ];
    let profile = ExtractionProfile::new(Sport::Football);
    let sheet = sheet_from_records(&roster, records(), &profile);
    assert_eq!(sheet.columns, FOOTBALL_COLUMNS);

    let cole = sheet.slot(21).unwrap();
    assert_eq!(cole.category, Some(FootballCategory::Rushing));
    assert_eq!(cole.stats.len(), FOOTBALL_COLUMNS);
    assert_eq!(sheet.slot(7).unwrap().category, Some(FootballCategory::Passing));

    let fox = sheet.slot(3).unwrap();
    assert!(fox.match_kind.is_some());
    assert!(!fox.has_stats());
}
