//! Basketball season stat sheets.

use super::values::{count, decimal, pair, percent};
use super::{athlete_row, ParseReport};
use crate::config::{Calibration, TableKey};
use crate::layout::Row;
use crate::records::{BasketballStats, RawStatRecord, SportStats};

/// Parse player rows with the calibrated basketball table.
///
/// Per-game rates the sheet leaves blank are derived from totals.
pub fn parse(rows: &[Row], calibration: &Calibration) -> ParseReport<RawStatRecord> {
    let table = calibration.table(TableKey::Basketball);
    let mut report = ParseReport::new();

    for row in rows {
        let Some(athlete) = athlete_row(row, table) else {
            continue;
        };
        let c = &athlete.cells;
        let (gp, gs) = pair(c.get("gp_gs"));
        let (fgm, fga) = pair(c.get("fg"));
        let (fg3m, fg3a) = pair(c.get("fg3"));
        let (ftm, fta) = pair(c.get("ft"));
        if gp.is_none() && fga.is_none() && count(c.get("pts")).is_none() {
            log::trace!("basketball: no stats on row '{}'", row.text());
            continue;
        }
        let mut stats = BasketballStats {
            gp,
            gs,
            min: count(c.get("min")),
            mpg: decimal(c.get("avg_min")),
            fgm,
            fga,
            fg_pct: percent(c.get("fg_pct")),
            fg3m,
            fg3a,
            fg3_pct: percent(c.get("fg3_pct")),
            ftm,
            fta,
            ft_pct: percent(c.get("ft_pct")),
            oreb: count(c.get("oreb")),
            dreb: count(c.get("dreb")),
            reb: count(c.get("reb")),
            rpg: decimal(c.get("avg_reb")),
            pf: count(c.get("pf")),
            ast: count(c.get("ast")),
            to: count(c.get("to")),
            blk: count(c.get("blk")),
            stl: count(c.get("stl")),
            pts: count(c.get("pts")),
            ppg: decimal(c.get("avg_pts")),
            ..Default::default()
        };
        stats.derive_rates();
        report.records.push(RawStatRecord::new(
            athlete.jersey,
            athlete.name,
            SportStats::Basketball(stats),
        ));
    }
    report
}
