//! Integration tests for the stats API adapter and its sheet path.

use serde_json::{json, Value};
use statsheet::api::adapt_json;
use statsheet::config::ExtractionProfile;
use statsheet::pipeline::sheet_from_api;
use statsheet::records::{RosterPlayer, Sport, SportStats};
use statsheet::selector::CatValue;

fn player(jersey: Value, first: &str, last: &str, stats: Option<Value>) -> Value {
    let season = match stats {
        Some(stats) => json!([{ "columns": [{ "statistic": stats }] }]),
        None => json!([]),
    };
    json!({
        "jersey_no": jersey,
        "first_name": first,
        "last_name": last,
        "position": "OH",
        "statistic": { "data": { "season": season } }
    })
}

fn response(players: Vec<Value>) -> String {
    json!({ "data": players }).to_string()
}

#[test]
fn test_volleyball_derivations() {
    let json = response(vec![player(
        json!("5"),
        "Kim",
        "Lee",
        Some(json!({ "sp": 40, "k": 120, "e": 30, "ta": 300, "a": 10, "sa": 12, "dig": 80, "bs": 4, "ba": 10 })),
    )]);
    let athletes = adapt_json(Sport::Volleyball, &json).unwrap();
    let SportStats::Volleyball(v) = &athletes[0].stats.as_ref().unwrap().stats else {
        panic!("expected volleyball");
    };
    assert_eq!(v.blocks, Some(9.0));
    assert_eq!(v.points, Some(141.0));
    assert_eq!(v.hit_pct, Some(0.3));
    assert_eq!(v.kps, Some(3.0));
    assert_eq!(v.dps, Some(2.0));
    assert_eq!(v.bps, Some(0.23));
}

#[test]
fn test_basketball_rates_from_totals() {
    let json = response(vec![player(
        json!(23),
        "Ana",
        "Diaz",
        Some(json!({ "gp": "10", "pts": "155", "oreb": 12, "dreb": 40, "ast": 31, "fgm": 60, "fga": 120, "ftm": 25, "fta": 30 })),
    )]);
    let athletes = adapt_json(Sport::Basketball, &json).unwrap();
    assert_eq!(athletes[0].roster.jersey, "23");
    let SportStats::Basketball(b) = &athletes[0].stats.as_ref().unwrap().stats else {
        panic!("expected basketball");
    };
    assert_eq!(b.reb, Some(52));
    assert_eq!(b.ppg, Some(15.5));
    assert_eq!(b.rpg, Some(5.2));
    assert_eq!(b.fg_pct, Some(50.0));
    assert_eq!(b.ft_pct, Some(83.3));
}

#[test]
fn test_softball_era_uses_seven_innings() {
    let stats = json!({ "p_app": 10, "ip": "21.0", "er": 6, "w": 3 });
    let json = response(vec![player(json!("8"), "Jo", "Ng", Some(stats))]);

    let softball = adapt_json(Sport::Softball, &json).unwrap();
    let SportStats::Baseball(s) = &softball[0].stats.as_ref().unwrap().stats else {
        panic!("expected baseball");
    };
    assert_eq!(s.pitching.as_ref().unwrap().era, Some(2.0));

    let baseball = adapt_json(Sport::Baseball, &json).unwrap();
    let SportStats::Baseball(b) = &baseball[0].stats.as_ref().unwrap().stats else {
        panic!("expected baseball");
    };
    assert_eq!(b.pitching.as_ref().unwrap().era, Some(2.57));
}

#[test]
fn test_empty_season_means_no_stats() {
    let json = response(vec![player(json!("3"), "No", "Stats", None)]);
    let athletes = adapt_json(Sport::Volleyball, &json).unwrap();
    assert!(athletes[0].stats.is_none());
}

#[test]
fn test_sort_order() {
    let json = response(vec![
        player(json!("12"), "A", "Twelve", None),
        player(Value::Null, "B", "Nojersey", None),
        player(json!("2"), "C", "Two", None),
        player(json!("00"), "D", "DoubleZero", None),
        player(json!("0"), "E", "Zero", None),
    ]);
    let athletes = adapt_json(Sport::Basketball, &json).unwrap();
    let jerseys: Vec<&str> = athletes.iter().map(|a| a.roster.jersey.as_str()).collect();
    assert_eq!(jerseys, vec!["00", "0", "2", "12", ""]);
}

#[test]
fn test_unsupported_sport_and_bad_json() {
    let json = response(vec![]);
    assert!(adapt_json(Sport::Football, &json).is_err());
    assert!(adapt_json(Sport::Soccer, &json).is_err());
    assert!(adapt_json(Sport::Basketball, "{ not json").is_err());
}

#[test]
fn test_sheet_from_api_without_roster() {
    let json = response(vec![
        player(json!("5"), "Kim", "Lee", Some(json!({ "sp": 10, "k": 30, "dig": 20 }))),
        player(json!("9"), "Ava", "Cole", None),
    ]);
    let profile = ExtractionProfile::new(Sport::Volleyball);
    let sheet = sheet_from_api(None, &json, &profile).unwrap();
    let kim = sheet.slot(5).unwrap();
    assert_eq!(kim.name, "Kim Lee");
    assert_eq!(kim.stats[0].label, "Pts");
    assert_eq!(kim.stats[0].value, CatValue::Number(30.0));
    assert_eq!(kim.stats[1].label, "Kills");
    assert!(!sheet.slot(9).unwrap().has_stats());
}

#[test]
fn test_sheet_from_api_with_roster() {
    let json = response(vec![player(json!("14"), "Kim", "Lee", Some(json!({ "sp": 10, "k": 30 })))]);
    // The roster says 4; the name pass still finds the record.
    let roster = vec![RosterPlayer::new("4", "Kim", "Lee")];
    let profile = ExtractionProfile::new(Sport::Volleyball);
    let sheet = sheet_from_api(Some(&roster), &json, &profile).unwrap();
    let kim = sheet.slot(4).unwrap();
    assert!(kim.has_stats());
    assert_eq!(sheet.athletes().count(), 1);
}
