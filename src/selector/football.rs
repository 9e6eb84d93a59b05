//! Football category classification and fixed per-category columns.

use super::{CatStat, Selection};
use crate::records::football::FootballStats;
use serde::Serialize;

/// Width of a football stat row.
pub const FOOTBALL_COLUMNS: usize = 5;

/// Passing attempts above this always make a passer.
const PASSER_ATTEMPTS: u32 = 10;

/// Category an athlete is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FootballCategory {
    /// Quarterbacks
    Passing,
    /// Ball carriers
    Rushing,
    /// Pass catchers
    Receiving,
    /// Defenders
    Defense,
    /// Punters
    Punting,
    /// Place kickers
    Kicking,
}

impl FootballCategory {
    /// Short label.
    pub fn label(&self) -> &'static str {
        match self {
            FootballCategory::Passing => "Passing",
            FootballCategory::Rushing => "Rushing",
            FootballCategory::Receiving => "Receiving",
            FootballCategory::Defense => "Defense",
            FootballCategory::Punting => "Punting",
            FootballCategory::Kicking => "Kicking",
        }
    }
}

/// Pick the category, checked in priority order.
///
/// ```
/// use statsheet::records::football::{FootballStats, ReceivingLine, RushingLine};
/// use statsheet::selector::{classify, FootballCategory};
///
/// let stats = FootballStats {
///     rushing: Some(RushingLine { att: Some(5), ..Default::default() }),
///     receiving: Some(ReceivingLine { no: Some(2), ..Default::default() }),
///     ..Default::default()
/// };
/// assert_eq!(classify(&stats), Some(FootballCategory::Rushing));
/// ```
pub fn classify(stats: &FootballStats) -> Option<FootballCategory> {
    let pass_att = stats.passing.as_ref().and_then(|p| p.att).unwrap_or(0);
    let rush_att = stats.rushing.as_ref().and_then(|r| r.att).unwrap_or(0);
    let receptions = stats.receiving.as_ref().and_then(|r| r.no).unwrap_or(0);
    let tackles = stats
        .defense
        .as_ref()
        .map(|d| {
            d.total
                .unwrap_or_else(|| f64::from(d.solo.unwrap_or(0)) + f64::from(d.ast.unwrap_or(0)))
        })
        .unwrap_or(0.0);
    let punts = stats.punting.as_ref().and_then(|p| p.no).unwrap_or(0);
    let kicks = stats
        .field_goals
        .as_ref()
        .and_then(|f| f.att)
        .unwrap_or(0)
        .saturating_add(stats.scoring.as_ref().and_then(|s| s.kick_att).unwrap_or(0));

    if pass_att > PASSER_ATTEMPTS || pass_att > rush_att {
        Some(FootballCategory::Passing)
    } else if rush_att > 0 && rush_att >= receptions {
        Some(FootballCategory::Rushing)
    } else if receptions > 0 {
        Some(FootballCategory::Receiving)
    } else if tackles > 0.0 {
        Some(FootballCategory::Defense)
    } else if punts > 0 {
        Some(FootballCategory::Punting)
    } else if kicks > 0 {
        Some(FootballCategory::Kicking)
    } else {
        None
    }
}

fn num<T: Into<f64>>(label: &str, value: Option<T>) -> CatStat {
    match value {
        Some(v) => CatStat::number(label, v.into()),
        None => CatStat::blank(),
    }
}

fn made_att(label: &str, made: Option<u32>, att: Option<u32>) -> CatStat {
    match (made, att) {
        (None, None) => CatStat::blank(),
        (m, a) => CatStat::text(label, format!("{}-{}", m.unwrap_or(0), a.unwrap_or(0))),
    }
}

/// Fixed fields for a category, before condensing.
pub fn category_fields(stats: &FootballStats, category: FootballCategory) -> Vec<CatStat> {
    match category {
        FootballCategory::Passing => {
            let p = stats.passing.clone().unwrap_or_default();
            vec![
                made_att("Cmp-Att", p.cmp, p.att),
                num("Yds", p.yds),
                num("TD", p.td),
                num("INT", p.int),
                num("Pct", p.pct),
            ]
        },
        FootballCategory::Rushing => {
            let r = stats.rushing.clone().unwrap_or_default();
            vec![num("Att", r.att), num("Yds", r.net), num("Avg", r.avg), num("TD", r.td), num("Long", r.long)]
        },
        FootballCategory::Receiving => {
            let r = stats.receiving.clone().unwrap_or_default();
            vec![num("Rec", r.no), num("Yds", r.yds), num("Avg", r.avg), num("TD", r.td), num("Long", r.long)]
        },
        FootballCategory::Defense => {
            let d = stats.defense.clone().unwrap_or_default();
            vec![num("Tot", d.total), num("Solo", d.solo), num("TFL", d.tfl), num("Sacks", d.sacks), num("INT", d.int)]
        },
        FootballCategory::Punting => {
            let p = stats.punting.clone().unwrap_or_default();
            vec![num("Punts", p.no), num("Yds", p.yds), num("Avg", p.avg), num("Long", p.long)]
        },
        FootballCategory::Kicking => {
            let fg = stats.field_goals.clone().unwrap_or_default();
            let sc = stats.scoring.clone().unwrap_or_default();
            vec![
                made_att("FG", fg.made, fg.att),
                num("Pct", fg.pct),
                num("Long", fg.long),
                made_att("PAT", sc.kick_made, sc.kick_att),
                num("Pts", sc.pts),
            ]
        },
    }
}

/// Drop zero, blank and dash fields, shift the rest left and pad to
/// [`FOOTBALL_COLUMNS`].
pub fn condense(fields: Vec<CatStat>) -> Vec<CatStat> {
    let mut out: Vec<CatStat> = fields.into_iter().filter(|f| f.value.is_meaningful()).collect();
    out.truncate(FOOTBALL_COLUMNS);
    out.resize_with(FOOTBALL_COLUMNS, CatStat::blank);
    out
}

/// Classify and lay out one athlete.
pub fn select(stats: &FootballStats) -> Selection {
    match classify(stats) {
        Some(category) => Selection {
            category: Some(category),
            stats: condense(category_fields(stats, category)),
        },
        None => Selection {
            category: None,
            stats: vec![CatStat::blank(); FOOTBALL_COLUMNS],
        },
    }
}
