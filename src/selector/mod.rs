//! Per-sport choice of the few stats shown next to each athlete.
//!
//! Soccer, volleyball and baseball walk a fixed priority list and keep the
//! first non-zero values. Basketball ranks normalized candidates. Football
//! classifies the athlete into one category and shows that category's
//! fields.

pub mod basketball;
pub mod football;

use crate::matcher::MatchedAthlete;
use crate::records::{BaseballStats, SoccerStats, SportStats, VolleyballStats};
use serde::Serialize;

pub use football::{classify, FootballCategory, FOOTBALL_COLUMNS};

/// A displayed stat value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatValue {
    /// Numeric value
    Number(f64),
    /// Preformatted text such as `12-15`
    Text(String),
    /// Padding
    Blank,
}

impl CatValue {
    /// Zero, blank and dash values are not worth a column.
    pub fn is_meaningful(&self) -> bool {
        match self {
            CatValue::Number(v) => *v != 0.0 && v.is_finite(),
            CatValue::Text(t) => {
                let t = t.trim();
                !t.is_empty() && !t.chars().all(|c| c == '-' || c == '0')
            },
            CatValue::Blank => false,
        }
    }
}

/// A `(label, value)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatStat {
    /// Column label
    pub label: String,
    /// Value
    pub value: CatValue,
}

impl CatStat {
    /// Numeric stat.
    pub fn number(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value: CatValue::Number(value),
        }
    }

    /// Text stat.
    pub fn text(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: CatValue::Text(value.into()),
        }
    }

    /// Blank padding column.
    pub fn blank() -> Self {
        Self {
            label: String::new(),
            value: CatValue::Blank,
        }
    }

    /// True for padding columns.
    pub fn is_blank(&self) -> bool {
        self.value == CatValue::Blank
    }
}

/// Stats chosen for one athlete.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    /// Football category, when the sport has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FootballCategory>,
    /// Chosen stats, left to right
    pub stats: Vec<CatStat>,
}

/// First `n` non-zero values from an ordered candidate list.
pub fn first_nonzero(candidates: &[(&str, Option<f64>)], n: usize) -> Vec<CatStat> {
    candidates
        .iter()
        .filter_map(|(label, value)| value.map(|v| CatStat::number(label, v)))
        .filter(|s| s.value.is_meaningful())
        .take(n)
        .collect()
}

fn as_f64(v: Option<u32>) -> Option<f64> {
    v.map(f64::from)
}

/// Soccer: goalkeepers get `Saves, GA, SHO`; field players the first
/// non-zero of `Goals, Assists, Pts, SOG, Shots`.
pub fn select_soccer(stats: &SoccerStats, n: usize) -> Vec<CatStat> {
    if let Some(gk) = &stats.goalkeeping {
        return vec![
            CatStat::number("Saves", gk.saves.unwrap_or(0) as f64),
            CatStat::number("GA", gk.ga.unwrap_or(0) as f64),
            CatStat::number("SHO", gk.sho.unwrap_or(0) as f64),
        ];
    }
    first_nonzero(
        &[
            ("Goals", as_f64(stats.goals)),
            ("Assists", as_f64(stats.assists)),
            ("Pts", as_f64(stats.points)),
            ("SOG", as_f64(stats.sog)),
            ("Shots", as_f64(stats.shots)),
        ],
        n,
    )
}

/// Volleyball: first non-zero of `Pts, Kills, Assists, Digs, Blocks, Aces`.
pub fn select_volleyball(stats: &VolleyballStats, n: usize) -> Vec<CatStat> {
    first_nonzero(
        &[
            ("Pts", stats.points),
            ("Kills", as_f64(stats.kills)),
            ("Assists", as_f64(stats.assists)),
            ("Digs", as_f64(stats.digs)),
            ("Blocks", stats.blocks),
            ("Aces", as_f64(stats.aces)),
        ],
        n,
    )
}

const PITCHER_POSITIONS: [&str; 3] = ["P", "RHP", "LHP"];

/// Whether a baseball/softball athlete reads as a pitcher: innings without
/// at-bats, or a pitcher position on the roster.
pub fn is_pitcher(stats: &BaseballStats, position: &str) -> bool {
    let position = position.trim().to_ascii_uppercase();
    if position.split(['/', ',', ' ']).any(|p| PITCHER_POSITIONS.contains(&p)) {
        return true;
    }
    let pitched = stats
        .pitching
        .as_ref()
        .and_then(|p| p.ip)
        .map_or(false, |ip| !ip.is_zero());
    let at_bats = stats.batting.as_ref().and_then(|b| b.ab).unwrap_or(0);
    pitched && at_bats == 0
}

/// Baseball/softball: pitchers `ERA, W, SO, SV`; hitters `AVG, HR, RBI, SB`.
pub fn select_baseball(stats: &BaseballStats, position: &str, n: usize) -> Vec<CatStat> {
    if is_pitcher(stats, position) {
        let p = stats.pitching.clone().unwrap_or_default();
        first_nonzero(
            &[("ERA", p.era), ("W", as_f64(p.w)), ("SO", as_f64(p.so)), ("SV", as_f64(p.sv))],
            n,
        )
    } else {
        let b = stats.batting.clone().unwrap_or_default();
        first_nonzero(
            &[("AVG", b.avg), ("HR", as_f64(b.hr)), ("RBI", as_f64(b.rbi)), ("SB", as_f64(b.sb))],
            n,
        )
    }
}

/// Choose display stats for an athlete. Athletes without stats get an empty
/// selection.
pub fn select(athlete: &MatchedAthlete, n: usize) -> Selection {
    let Some(record) = &athlete.stats else {
        return Selection::default();
    };
    match &record.stats {
        SportStats::Soccer(s) => Selection {
            category: None,
            stats: select_soccer(s, n),
        },
        SportStats::Volleyball(s) => Selection {
            category: None,
            stats: select_volleyball(s, n),
        },
        SportStats::Baseball(s) => Selection {
            category: None,
            stats: select_baseball(s, &athlete.roster.position, n),
        },
        SportStats::Basketball(s) => Selection {
            category: None,
            stats: basketball::select(s, n),
        },
        SportStats::Football(s) => football::select(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{BattingLine, GoalkeeperLine, Innings, PitchingLine};

    #[test]
    fn test_soccer_priority_skips_zero() {
        let stats = SoccerStats {
            goals: Some(2),
            assists: Some(0),
            points: Some(4),
            sog: Some(5),
            shots: Some(7),
            ..Default::default()
        };
        let picked = select_soccer(&stats, 3);
        assert_eq!(
            picked,
            vec![CatStat::number("Goals", 2.0), CatStat::number("Pts", 4.0), CatStat::number("SOG", 5.0)]
        );
    }

    #[test]
    fn test_goalkeeper_fixed_columns() {
        let stats = SoccerStats {
            goals: Some(1),
            goalkeeping: Some(GoalkeeperLine {
                saves: Some(40),
                ga: Some(0),
                sho: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let labels: Vec<String> = select_soccer(&stats, 3).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Saves", "GA", "SHO"]);
    }

    #[test]
    fn test_volleyball_priority() {
        let stats = VolleyballStats {
            points: Some(0.0),
            kills: Some(10),
            digs: Some(30),
            blocks: Some(2.5),
            ..Default::default()
        };
        let labels: Vec<String> = select_volleyball(&stats, 3).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Kills", "Digs", "Blocks"]);
    }

    #[test]
    fn test_baseball_pitcher_detection() {
        let pitcher = BaseballStats {
            batting: Some(BattingLine { ab: Some(0), ..Default::default() }),
            pitching: Some(PitchingLine {
                era: Some(2.5),
                w: Some(4),
                so: Some(50),
                ip: Some(Innings { full: 40, partial: 0 }),
                ..Default::default()
            }),
        };
        assert!(is_pitcher(&pitcher, "OF"));
        let labels: Vec<String> = select_baseball(&pitcher, "", 3).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["ERA", "W", "SO"]);

        let hitter = BaseballStats {
            batting: Some(BattingLine { avg: Some(0.3), hr: Some(0), rbi: Some(12), sb: Some(3), ab: Some(50), ..Default::default() }),
            pitching: None,
        };
        assert!(!is_pitcher(&hitter, "SS"));
        assert!(is_pitcher(&hitter, "RHP/1B"));
        let labels: Vec<String> = select_baseball(&hitter, "SS", 3).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["AVG", "RBI", "SB"]);
    }

    #[test]
    fn test_meaningful_values() {
        assert!(!CatValue::Text("-".into()).is_meaningful());
        assert!(!CatValue::Text("0-0".into()).is_meaningful());
        assert!(CatValue::Text("3-4".into()).is_meaningful());
        assert!(!CatValue::Number(0.0).is_meaningful());
        assert!(!CatValue::Blank.is_meaningful());
    }
}
