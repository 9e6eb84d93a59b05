//! Soccer season stat sheets: a field-player table followed by a
//! goalkeeping table.

use super::values::{self, count, decimal, leading_count, pair, triple};
use super::{athlete_row, AthleteTable, ParseReport};
use crate::config::{Calibration, TableKey};
use crate::layout::Row;
use crate::records::{GoalkeeperLine, RawStatRecord, SoccerStats, SportStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Field,
    Goalkeeping,
}

fn detect_header(words: &[String]) -> Option<Section> {
    let has = |w: &str| words.iter().any(|x| x == w);
    if has("gaa") || has("saves") || has("sv%") {
        Some(Section::Goalkeeping)
    } else if has("sog") || has("sh%") || (has("g") && has("a") && has("pts")) {
        Some(Section::Field)
    } else {
        None
    }
}

/// Parse both tables. Sheets without a field-player header are read as
/// field players until a goalkeeping header appears.
pub fn parse(rows: &[Row], calibration: &Calibration) -> ParseReport<RawStatRecord> {
    let field_table = calibration.table(TableKey::SoccerField);
    let keeper_table = calibration.table(TableKey::SoccerGoalkeeper);
    let mut table = AthleteTable::<SoccerStats>::new();
    let mut report = ParseReport::new();
    let mut section = Section::Field;

    for row in rows {
        if let Some(next) = detect_header(&values::header_words(row)) {
            section = next;
            continue;
        }
        match section {
            Section::Field => {
                let Some(athlete) = athlete_row(row, field_table) else {
                    continue;
                };
                let c = &athlete.cells;
                let (gp, gs) = pair(c.get("gp_gs"));
                let entry = table.upsert(&athlete.jersey, &athlete.name);
                entry.gp = gp;
                entry.gs = gs;
                entry.goals = count(c.get("g"));
                entry.assists = count(c.get("a"));
                entry.points = count(c.get("pts"));
                entry.shots = count(c.get("sh"));
                entry.sog = count(c.get("sog"));
                entry.gw = count(c.get("gw"));
            },
            Section::Goalkeeping => {
                let Some(athlete) = athlete_row(row, keeper_table) else {
                    continue;
                };
                let c = &athlete.cells;
                let (gp, gs) = pair(c.get("gp_gs"));
                let (w, l, t) = triple(c.get("w_l_t"));
                let line = GoalkeeperLine {
                    min: count(c.get("min")),
                    ga: count(c.get("ga")),
                    gaa: decimal(c.get("gaa")),
                    saves: count(c.get("saves")),
                    sv_pct: decimal(c.get("sv_pct")),
                    w,
                    l,
                    t,
                    sho: leading_count(c.get("sho")),
                };
                let entry = table.upsert(&athlete.jersey, &athlete.name);
                entry.gp = entry.gp.or(gp);
                entry.gs = entry.gs.or(gs);
                entry.goalkeeping = Some(line);
            },
        }
    }

    report.records = table
        .into_entries()
        .into_iter()
        .map(|(jersey, name, stats)| RawStatRecord::new(jersey, name, SportStats::Soccer(stats)))
        .collect();
    report
}
