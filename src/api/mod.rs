//! Adapter for third-party stats API JSON.
//!
//! The API returns roster and season stats together. Each player carries
//! `statistic.data.season`, whose first entry holds one or more column
//! groups of raw key/value stats. Values may be JSON numbers or numeric
//! strings.
//!
//! Stat keys read per sport:
//!
//! - baseball/softball batting: `gp gs ab r h 2b 3b hr rbi tb bb hbp so gdp
//!   sf sh sb sba`; pitching: `p_app p_gs w l sv cg sho ip p_h p_r er p_bb
//!   p_so`
//! - basketball: `gp gs min fgm fga fg3m fg3a ftm fta oreb dreb reb ast to
//!   blk stl pf pts`
//! - volleyball: `sp mp k e ta a sa se dig bs ba pts`
//!
//! Rates the API does not send (averages, percentages, per-game and per-set
//! values, weighted blocks, points) are derived. A player whose season array
//! is missing or empty gets no stats, which is different from zero stats.

pub mod types;

use crate::error::{Error, Result};
use crate::records::{
    round1, round2, round3, BaseballStats, BasketballStats, BattingLine, Innings, PitchingLine,
    RawStatRecord, RosterPlayer, Sport, SportStats, VolleyballStats,
};
use serde_json::{Map, Value};

pub use types::{ApiPlayer, ApiResponse, Season, SeasonEntry, StatColumn};

/// A roster entry from the API with its stats, if it had any.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiAthlete {
    /// Roster data
    pub roster: RosterPlayer,
    /// Season stats; `None` when the season array was absent or empty
    pub stats: Option<RawStatRecord>,
}

type Stats = Map<String, Value>;

fn number(stats: &Stats, key: &str) -> Option<f64> {
    match stats.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.chars().all(|c| c == '-') {
                None
            } else {
                s.parse().ok()
            }
        },
        _ => None,
    }
}

fn count(stats: &Stats, key: &str) -> Option<u32> {
    number(stats, key).filter(|v| *v >= 0.0).map(|v| v.round() as u32)
}

/// `base` plus the present `extra` counts, or `None` on overflow.
fn checked_sum(base: u32, extra: &[Option<u32>]) -> Option<u32> {
    extra
        .iter()
        .try_fold(base, |acc, v| acc.checked_add(v.unwrap_or(0)))
}

fn ratio(num: Option<u32>, den: Option<u32>) -> Option<f64> {
    match (num, den) {
        (Some(n), Some(d)) if d > 0 => Some(n as f64 / d as f64),
        _ => None,
    }
}

fn has_any(stats: &Stats, keys: &[&str]) -> bool {
    keys.iter().any(|k| number(stats, k).is_some())
}

fn innings(stats: &Stats) -> Option<Innings> {
    match stats.get("ip")? {
        Value::String(s) => Innings::parse(s.trim()),
        Value::Number(n) => Innings::parse(&format!("{:.1}", n.as_f64()?)),
        _ => None,
    }
}

fn batting(stats: &Stats) -> Option<BattingLine> {
    if !has_any(stats, &["ab", "h", "r", "gp"]) {
        return None;
    }
    let mut line = BattingLine {
        gp: count(stats, "gp"),
        gs: count(stats, "gs"),
        ab: count(stats, "ab"),
        r: count(stats, "r"),
        h: count(stats, "h"),
        doubles: count(stats, "2b"),
        triples: count(stats, "3b"),
        hr: count(stats, "hr"),
        rbi: count(stats, "rbi"),
        tb: count(stats, "tb"),
        bb: count(stats, "bb"),
        hbp: count(stats, "hbp"),
        so: count(stats, "so"),
        gdp: count(stats, "gdp"),
        sf: count(stats, "sf"),
        sh: count(stats, "sh"),
        sb: count(stats, "sb"),
        sb_att: count(stats, "sba"),
        ..Default::default()
    };
    if line.tb.is_none() {
        if let Some(h) = line.h {
            let d = line.doubles.unwrap_or(0);
            let t = line.triples.unwrap_or(0);
            let hr = line.hr.unwrap_or(0);
            // Counts that do not fit leave the total unset.
            line.tb = t
                .checked_mul(2)
                .zip(hr.checked_mul(3))
                .and_then(|(t2, hr3)| h.checked_add(d)?.checked_add(t2)?.checked_add(hr3));
        }
    }
    line.avg = ratio(line.h, line.ab).map(round3);
    line.slg = ratio(line.tb, line.ab).map(round3);
    let on_base = line.h.and_then(|h| checked_sum(h, &[line.bb, line.hbp]));
    let chances = line.ab.and_then(|ab| checked_sum(ab, &[line.bb, line.hbp, line.sf]));
    line.obp = ratio(on_base, chances).map(round3);
    Some(line)
}

fn pitching(stats: &Stats, innings_per_game: f64) -> Option<PitchingLine> {
    if !has_any(stats, &["ip", "p_app"]) {
        return None;
    }
    let ip = innings(stats);
    let er = count(stats, "er");
    let era = match (ip, er) {
        (Some(ip), Some(er)) if !ip.is_zero() => Some(round2(er as f64 * innings_per_game / ip.as_f64())),
        _ => None,
    };
    Some(PitchingLine {
        era,
        w: count(stats, "w"),
        l: count(stats, "l"),
        app: count(stats, "p_app"),
        gs: count(stats, "p_gs"),
        cg: count(stats, "cg"),
        sho: count(stats, "sho"),
        sv: count(stats, "sv"),
        ip,
        h: count(stats, "p_h"),
        r: count(stats, "p_r"),
        er,
        bb: count(stats, "p_bb"),
        so: count(stats, "p_so"),
    })
}

fn basketball(stats: &Stats) -> BasketballStats {
    let pct = |made: Option<u32>, att: Option<u32>| ratio(made, att).map(|r| round1(r * 100.0));
    let oreb = count(stats, "oreb");
    let dreb = count(stats, "dreb");
    let reb = count(stats, "reb").or(match (oreb, dreb) {
        (Some(o), Some(d)) => o.checked_add(d),
        _ => None,
    });
    let mut line = BasketballStats {
        gp: count(stats, "gp"),
        gs: count(stats, "gs"),
        min: count(stats, "min"),
        fgm: count(stats, "fgm"),
        fga: count(stats, "fga"),
        fg3m: count(stats, "fg3m"),
        fg3a: count(stats, "fg3a"),
        ftm: count(stats, "ftm"),
        fta: count(stats, "fta"),
        oreb,
        dreb,
        reb,
        pf: count(stats, "pf"),
        ast: count(stats, "ast"),
        to: count(stats, "to"),
        blk: count(stats, "blk"),
        stl: count(stats, "stl"),
        pts: count(stats, "pts"),
        ..Default::default()
    };
    line.fg_pct = pct(line.fgm, line.fga);
    line.fg3_pct = pct(line.fg3m, line.fg3a);
    line.ft_pct = pct(line.ftm, line.fta);
    line.derive_rates();
    line
}

fn volleyball(stats: &Stats) -> VolleyballStats {
    let mut line = VolleyballStats {
        sp: count(stats, "sp"),
        mp: count(stats, "mp"),
        kills: count(stats, "k"),
        errors: count(stats, "e"),
        attempts: count(stats, "ta"),
        assists: count(stats, "a"),
        aces: count(stats, "sa"),
        service_errors: count(stats, "se"),
        digs: count(stats, "dig"),
        block_solo: count(stats, "bs"),
        block_assists: count(stats, "ba"),
        points: number(stats, "pts"),
        ..Default::default()
    };
    line.derive();
    line
}

fn sport_stats(sport: Sport, stats: &Stats) -> Result<SportStats> {
    match sport {
        Sport::Baseball | Sport::Softball => {
            let innings_per_game = if sport == Sport::Softball { 7.0 } else { 9.0 };
            Ok(SportStats::Baseball(BaseballStats {
                batting: batting(stats),
                pitching: pitching(stats, innings_per_game),
            }))
        },
        Sport::Basketball => Ok(SportStats::Basketball(basketball(stats))),
        Sport::Volleyball => Ok(SportStats::Volleyball(volleyball(stats))),
        other => Err(Error::InvalidConfig(format!("no stats API mapping for {}", other))),
    }
}

/// Jerseys sort numerically with `"00"` first; players missing a jersey or
/// a name sort last.
fn sort_key(athlete: &ApiAthlete) -> (u8, u32, String) {
    let roster = &athlete.roster;
    if roster.jersey.is_empty() || (roster.first_name.is_empty() && roster.last_name.is_empty()) {
        return (3, 0, roster.jersey.clone());
    }
    if roster.jersey == "00" {
        return (0, 0, roster.jersey.clone());
    }
    match roster.jersey.parse::<u32>() {
        Ok(n) => (1, n, roster.jersey.clone()),
        Err(_) => (2, 0, roster.jersey.clone()),
    }
}

/// Map a parsed API response for `sport`.
///
/// # Errors
///
/// Fails for sports the API does not cover (soccer, football).
pub fn adapt(sport: Sport, response: &ApiResponse) -> Result<Vec<ApiAthlete>> {
    if matches!(sport, Sport::Soccer | Sport::Football) {
        return Err(Error::InvalidConfig(format!("no stats API mapping for {}", sport)));
    }
    let mut athletes = Vec::with_capacity(response.data.len());
    for player in &response.data {
        let first_name = player.first_name.clone().unwrap_or_default().trim().to_string();
        let last_name = player.last_name.clone().unwrap_or_default().trim().to_string();
        let jersey = player.jersey().unwrap_or_default();
        let mut roster = RosterPlayer::new(jersey.clone(), first_name.clone(), last_name.clone());
        roster.position = player.position.clone().unwrap_or_default();

        let stats = match player.season() {
            Some(season) if !season.columns.is_empty() => {
                let merged = season.merged();
                let name = format!("{}, {}", last_name, first_name);
                Some(RawStatRecord::new(jersey, name, sport_stats(sport, &merged)?))
            },
            _ => {
                log::debug!("{} {}: no season stats", first_name, last_name);
                None
            },
        };
        athletes.push(ApiAthlete { roster, stats });
    }
    athletes.sort_by_key(sort_key);
    Ok(athletes)
}

/// Parse API JSON text and map it for `sport`.
///
/// # Errors
///
/// Fails on malformed JSON or an unsupported sport.
pub fn adapt_json(sport: Sport, json: &str) -> Result<Vec<ApiAthlete>> {
    let response: ApiResponse = serde_json::from_str(json)?;
    adapt(sport, &response)
}
