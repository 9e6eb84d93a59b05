//! Basketball stat ranking.
//!
//! Candidates are scored on a common scale: per-game rates as they are,
//! field-goal and three-point percentages times ten (as fractions), free
//! throws times 6.66 and minutes per game divided by ten once above 30.
//! Ties fall back to the candidate order below.

use super::{CatStat, CatValue};
use crate::records::BasketballStats;

const FT_WEIGHT: f64 = 6.66;
const SHOOTING_WEIGHT: f64 = 10.0;
const MPG_FLOOR: f64 = 30.0;
const NATURAL_TOP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    label: &'static str,
    value: f64,
    score: f64,
    order: usize,
    is_pct: bool,
}

fn candidates(stats: &BasketballStats) -> Vec<Candidate> {
    let fraction = |pct: Option<f64>| pct.map(|p| p / 100.0);
    let raw: [(&'static str, Option<f64>, Option<f64>, bool); 9] = [
        ("PPG", stats.ppg, stats.ppg, false),
        ("RPG", stats.rpg, stats.rpg, false),
        ("APG", stats.apg, stats.apg, false),
        ("SPG", stats.spg, stats.spg, false),
        ("BPG", stats.bpg, stats.bpg, false),
        ("FG%", stats.fg_pct, fraction(stats.fg_pct).map(|f| f * SHOOTING_WEIGHT), true),
        ("3P%", stats.fg3_pct, fraction(stats.fg3_pct).map(|f| f * SHOOTING_WEIGHT), true),
        ("FT%", stats.ft_pct, fraction(stats.ft_pct).map(|f| f * FT_WEIGHT), true),
        ("MPG", stats.mpg, stats.mpg.filter(|m| *m > MPG_FLOOR).map(|m| m / 10.0), false),
    ];
    raw.iter()
        .enumerate()
        .filter_map(|(order, (label, value, score, is_pct))| {
            let value = (*value)?;
            let score = (*score)?;
            (value > 0.0 && score > 0.0).then_some(Candidate {
                label: *label,
                value,
                score,
                order,
                is_pct: *is_pct,
            })
        })
        .collect()
}

fn ranked(stats: &BasketballStats) -> Vec<Candidate> {
    let mut list = candidates(stats);
    list.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.order.cmp(&b.order)));
    list
}

/// Choose up to `n` basketball stats.
///
/// Points per game goes to the first column whenever it ranks in the
/// natural top three, and replaces the weakest shooting percentage when
/// every chosen stat would otherwise be a percentage.
pub fn select(stats: &BasketballStats, n: usize) -> Vec<CatStat> {
    if n == 0 {
        return Vec::new();
    }
    let ranked = ranked(stats);
    let ppg = ranked.iter().find(|c| c.label == "PPG").copied();
    let mut chosen: Vec<Candidate> = ranked.iter().take(n).copied().collect();

    if let Some(ppg) = ppg {
        let natural = ranked.iter().take(NATURAL_TOP).any(|c| c.label == "PPG");
        if natural {
            chosen.retain(|c| c.label != "PPG");
            chosen.insert(0, ppg);
            chosen.truncate(n);
        } else if !chosen.is_empty() && chosen.iter().all(|c| c.is_pct) {
            chosen.pop();
            chosen.insert(0, ppg);
        }
    }

    chosen
        .into_iter()
        .map(|c| CatStat {
            label: c.label.to_string(),
            value: CatValue::Number(c.value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(stats: &BasketballStats, n: usize) -> Vec<String> {
        select(stats, n).into_iter().map(|s| s.label).collect()
    }

    #[test]
    fn test_scoring_order() {
        let stats = BasketballStats {
            ppg: Some(12.4),
            rpg: Some(7.1),
            apg: Some(1.2),
            fg_pct: Some(52.0),
            ft_pct: Some(70.0),
            ..Default::default()
        };
        // FG% scores 5.2, FT% 4.66, APG 1.2.
        assert_eq!(labels(&stats, 3), vec!["PPG", "RPG", "FG%"]);
    }

    #[test]
    fn test_ppg_pinned_first() {
        let stats = BasketballStats {
            ppg: Some(4.0),
            rpg: Some(8.0),
            fg_pct: Some(60.0),
            ..Default::default()
        };
        assert_eq!(labels(&stats, 3), vec!["PPG", "RPG", "FG%"]);
        assert_eq!(labels(&stats, 2), vec!["PPG", "RPG"]);
    }

    #[test]
    fn test_all_percentages_swaps_in_ppg() {
        let stats = BasketballStats {
            ppg: Some(1.5),
            rpg: Some(1.0),
            apg: Some(1.0),
            spg: Some(1.0),
            fg_pct: Some(50.0),
            fg3_pct: Some(45.0),
            ft_pct: Some(90.0),
            ..Default::default()
        };
        // Natural order: FT% 5.99, FG% 5.0, 3P% 4.5, PPG 1.5.
        assert_eq!(labels(&stats, 3), vec!["PPG", "FT%", "FG%"]);
    }

    #[test]
    fn test_minutes_only_above_thirty() {
        let busy = BasketballStats {
            mpg: Some(34.0),
            ..Default::default()
        };
        assert_eq!(labels(&busy, 3), vec!["MPG"]);
        let bench = BasketballStats {
            mpg: Some(12.0),
            ..Default::default()
        };
        assert!(select(&bench, 3).is_empty());
    }

    #[test]
    fn test_ties_follow_candidate_order() {
        let stats = BasketballStats {
            apg: Some(2.0),
            rpg: Some(2.0),
            spg: Some(2.0),
            bpg: Some(2.0),
            ..Default::default()
        };
        assert_eq!(labels(&stats, 3), vec!["RPG", "APG", "SPG"]);
    }
}
