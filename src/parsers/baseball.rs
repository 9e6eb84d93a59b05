//! Baseball and softball season stat sheets.
//!
//! Two document families are read:
//!
//! - **Columnar**: every column is its own token; rows go through the
//!   calibrated batting and pitching column tables.
//! - **Fused digits**: the text layer runs `R H 2B 3B HR [XBH]`, the
//!   `RBI TB [SLG]` group and the pitching `IP H R ER BB SO` group together,
//!   so those tokens go through [`crate::splitter`].
//!
//! Both switch between batting and pitching on header rows and merge a
//! player's two lines into one record.

use super::values::{self, count, decimal, leading_count, pair};
use super::{athlete_row, AthleteTable, ParseReport};
use crate::config::{Calibration, TableKey};
use crate::error::ParseWarning;
use crate::layout::Row;
use crate::records::{BaseballStats, BattingLine, Innings, PitchingLine, RawStatRecord, SportStats};
use crate::splitter::{split_batting, split_pitching, split_rbi_tb, split_sb_att};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref AVG: Regex = Regex::new(r"^(\d?\.\d{3}|-+)$").unwrap();
    static ref ERA: Regex = Regex::new(r"(?i)^(\d+\.\d{2}|-+|inf)$").unwrap();
}

/// Section a baseball sheet is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Batting,
    Pitching,
    /// Fielding and other tables that are not read
    Ignored,
}

fn detect_header(words: &[String]) -> Option<Mode> {
    let has = |w: &str| words.iter().any(|x| x == w);
    if has("avg") && has("ab") {
        Some(Mode::Batting)
    } else if has("era") && has("ip") {
        Some(Mode::Pitching)
    } else if has("fld%") || (has("po") && has("e") && !has("ab")) {
        Some(Mode::Ignored)
    } else {
        None
    }
}

fn into_report(table: AthleteTable<BaseballStats>, mut report: ParseReport<RawStatRecord>) -> ParseReport<RawStatRecord> {
    report.records = table
        .into_entries()
        .into_iter()
        .map(|(jersey, name, stats)| RawStatRecord::new(jersey, name, SportStats::Baseball(stats)))
        .collect();
    report
}

/// Parse a columnar sheet with the calibrated batting and pitching tables.
pub fn parse_columnar(rows: &[Row], calibration: &Calibration) -> ParseReport<RawStatRecord> {
    let batting_table = calibration.table(TableKey::BaseballBatting);
    let pitching_table = calibration.table(TableKey::BaseballPitching);
    let mut table = AthleteTable::<BaseballStats>::new();
    let report = ParseReport::new();
    let mut mode = None;

    for row in rows {
        if let Some(next) = detect_header(&values::header_words(row)) {
            log::debug!("baseball section -> {:?}", next);
            mode = Some(next);
            continue;
        }
        match mode {
            Some(Mode::Batting) => {
                if let Some(athlete) = athlete_row(row, batting_table) {
                    let c = &athlete.cells;
                    let (gp, gs) = pair(c.get("gp_gs"));
                    let (sb, sb_att) = split_sb_att(c.get("sb_att")).map_or((None, None), |(s, a)| (Some(s), Some(a)));
                    let line = BattingLine {
                        avg: decimal(c.get("avg")),
                        gp,
                        gs,
                        ab: count(c.get("ab")),
                        r: count(c.get("r")),
                        h: count(c.get("h")),
                        doubles: count(c.get("2b")),
                        triples: count(c.get("3b")),
                        hr: count(c.get("hr")),
                        rbi: count(c.get("rbi")),
                        tb: count(c.get("tb")),
                        slg: decimal(c.get("slg")),
                        bb: count(c.get("bb")),
                        hbp: count(c.get("hbp")),
                        so: count(c.get("so")),
                        gdp: count(c.get("gdp")),
                        obp: decimal(c.get("obp")),
                        sf: count(c.get("sf")),
                        sh: count(c.get("sh")),
                        sb,
                        sb_att,
                    };
                    table.upsert(&athlete.jersey, &athlete.name).batting = Some(line);
                }
            },
            Some(Mode::Pitching) => {
                if let Some(athlete) = athlete_row(row, pitching_table) {
                    let c = &athlete.cells;
                    let (w, l) = pair(c.get("w_l"));
                    let (app, gs) = pair(c.get("app_gs"));
                    let line = PitchingLine {
                        era: decimal(c.get("era")),
                        w,
                        l,
                        app,
                        gs,
                        cg: count(c.get("cg")),
                        sho: leading_count(c.get("sho")),
                        sv: count(c.get("sv")),
                        ip: Innings::parse(c.get("ip")),
                        h: count(c.get("h")),
                        r: count(c.get("r")),
                        er: count(c.get("er")),
                        bb: count(c.get("bb")),
                        so: count(c.get("so")),
                    };
                    table.upsert(&athlete.jersey, &athlete.name).pitching = Some(line);
                }
            },
            Some(Mode::Ignored) | None => {},
        }
    }
    into_report(table, report)
}

/// Jersey, name and the remaining tokens of a fused line. The name runs
/// until the first token accepted by `first_stat`.
fn split_identity<'a>(tokens: &[&'a str], first_stat: &Regex) -> Option<(String, String, Vec<&'a str>)> {
    let (first, rest) = tokens.split_first()?;
    let jersey = values::jersey(first)?;
    let name_len = rest.iter().position(|t| first_stat.is_match(t))?;
    if name_len == 0 {
        return None;
    }
    let name = rest[..name_len].join(" ");
    Some((jersey, name, rest[name_len..].to_vec()))
}

fn ambiguous(report: &mut ParseReport<RawStatRecord>, jersey: &str, name: &str, field: &str, token: &str) {
    report.warn(ParseWarning::AmbiguousToken {
        jersey: jersey.to_string(),
        name: name.to_string(),
        field: field.to_string(),
        token: token.to_string(),
    });
}

fn fused_batting(
    jersey: &str,
    name: &str,
    stats: &[&str],
    report: &mut ParseReport<RawStatRecord>,
) -> Option<BattingLine> {
    // avg gp-gs ab RH2B3BHR[XBH] RBI+TB[+SLG] bb hbp so gdp obp sf sh sb-att
    if stats.len() < 4 {
        return None;
    }
    let cell = |i: usize| stats.get(i).copied().unwrap_or("");
    let (gp, gs) = pair(cell(1));
    let ab = count(cell(2));
    let mut line = BattingLine {
        avg: decimal(cell(0)),
        gp,
        gs,
        ab,
        bb: count(cell(5)),
        hbp: count(cell(6)),
        so: count(cell(7)),
        gdp: count(cell(8)),
        obp: decimal(cell(9)),
        sf: count(cell(10)),
        sh: count(cell(11)),
        ..Default::default()
    };
    if let Some((sb, att)) = split_sb_att(cell(12)) {
        line.sb = Some(sb);
        line.sb_att = Some(att);
    }

    match split_batting(cell(3), ab.unwrap_or(0)) {
        Some(split) => {
            line.r = Some(split.r);
            line.h = Some(split.h);
            line.doubles = Some(split.doubles);
            line.triples = Some(split.triples);
            line.hr = Some(split.hr);
            let tb = split.total_bases();
            line.tb = Some(tb);
            match split_rbi_tb(cell(4), tb) {
                Some(rbi) => {
                    line.rbi = Some(rbi.rbi);
                    line.slg = rbi.slg;
                },
                None if !cell(4).is_empty() => ambiguous(report, jersey, name, "RBI-TB", cell(4)),
                None => {},
            }
        },
        None => ambiguous(report, jersey, name, "R-H-2B-3B-HR", cell(3)),
    }
    Some(line)
}

fn fused_pitching(
    jersey: &str,
    name: &str,
    stats: &[&str],
    report: &mut ParseReport<RawStatRecord>,
) -> Option<PitchingLine> {
    // era w-l app-gs cg sho sv IP+H+R+ER+BB+SO
    if stats.len() < 7 {
        return None;
    }
    let (w, l) = pair(stats[1]);
    let (app, gs) = pair(stats[2]);
    let mut line = PitchingLine {
        era: decimal(stats[0]),
        w,
        l,
        app,
        gs,
        cg: count(stats[3]),
        sho: leading_count(stats[4]),
        sv: count(stats[5]),
        ..Default::default()
    };
    match split_pitching(stats[6]) {
        Some(split) => {
            line.ip = Some(split.ip);
            line.h = Some(split.h);
            line.r = Some(split.r);
            line.er = Some(split.er);
            line.bb = Some(split.bb);
            line.so = Some(split.so);
        },
        None => ambiguous(report, jersey, name, "IP-H-R-ER-BB-SO", stats[6]),
    }
    Some(line)
}

/// Parse a sheet whose numeric columns are fused by the text layer.
pub fn parse_fused(rows: &[Row]) -> ParseReport<RawStatRecord> {
    let mut table = AthleteTable::<BaseballStats>::new();
    let mut report = ParseReport::new();
    let mut mode = None;

    for row in rows {
        if let Some(next) = detect_header(&values::header_words(row)) {
            log::debug!("baseball section -> {:?}", next);
            mode = Some(next);
            continue;
        }
        let text = row.text();
        if values::is_summary(&text) {
            continue;
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();
        match mode {
            Some(Mode::Batting) => {
                let Some((jersey, name, stats)) = split_identity(&tokens, &AVG) else {
                    continue;
                };
                match fused_batting(&jersey, &name, &stats, &mut report) {
                    Some(line) => table.upsert(&jersey, &name).batting = Some(line),
                    None => report.warn(ParseWarning::SkippedRow {
                        section: "batting".to_string(),
                        text: text.clone(),
                    }),
                }
            },
            Some(Mode::Pitching) => {
                let Some((jersey, name, stats)) = split_identity(&tokens, &ERA) else {
                    continue;
                };
                match fused_pitching(&jersey, &name, &stats, &mut report) {
                    Some(line) => table.upsert(&jersey, &name).pitching = Some(line),
                    None => report.warn(ParseWarning::SkippedRow {
                        section: "pitching".to_string(),
                        text: text.clone(),
                    }),
                }
            },
            Some(Mode::Ignored) | None => {},
        }
    }
    into_report(table, report)
}
