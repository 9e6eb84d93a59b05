//! Volleyball season stat sheets.

use super::values::{count, decimal};
use super::{athlete_row, ParseReport};
use crate::config::{Calibration, TableKey};
use crate::layout::Row;
use crate::records::{RawStatRecord, SportStats, VolleyballStats};

/// Parse player rows with the calibrated volleyball table. Weighted blocks,
/// points and per-set rates missing from the sheet are derived.
pub fn parse(rows: &[Row], calibration: &Calibration) -> ParseReport<RawStatRecord> {
    let table = calibration.table(TableKey::Volleyball);
    let mut report = ParseReport::new();

    for row in rows {
        let Some(athlete) = athlete_row(row, table) else {
            continue;
        };
        let c = &athlete.cells;
        let sp = count(c.get("sp"));
        if sp.is_none() && count(c.get("k")).is_none() {
            continue;
        }
        let mut stats = VolleyballStats {
            sp,
            mp: count(c.get("mp")),
            kills: count(c.get("k")),
            kps: decimal(c.get("k_per_s")),
            errors: count(c.get("e")),
            attempts: count(c.get("ta")),
            hit_pct: decimal(c.get("pct")),
            assists: count(c.get("a")),
            aps: decimal(c.get("a_per_s")),
            aces: count(c.get("sa")),
            service_errors: count(c.get("se")),
            digs: count(c.get("dig")),
            dps: decimal(c.get("d_per_s")),
            block_solo: count(c.get("bs")),
            block_assists: count(c.get("ba")),
            blocks: decimal(c.get("blk")),
            bps: decimal(c.get("b_per_s")),
            points: decimal(c.get("pts")),
        };
        stats.derive();
        report.records.push(RawStatRecord::new(
            athlete.jersey,
            athlete.name,
            SportStats::Volleyball(stats),
        ));
    }
    report
}
