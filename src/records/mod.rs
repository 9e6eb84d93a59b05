//! Roster entries and sparse per-sport stat records.
//!
//! Every stat field is optional: `None` means the source did not provide
//! the value, which is different from a recorded zero.

pub mod football;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use football::{
    DefenseLine, FieldGoalLine, FootballStats, PassingLine, PuntingLine, ReceivingLine,
    ReturnLine, RushingLine, ScoringLine,
};

/// Supported sports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    /// Baseball
    Baseball,
    /// Softball, read exactly like baseball
    Softball,
    /// Basketball
    Basketball,
    /// Soccer
    Soccer,
    /// Volleyball
    Volleyball,
    /// Football
    Football,
}

impl Sport {
    /// Baseball and softball share parsers and record shapes.
    pub fn is_diamond(&self) -> bool {
        matches!(self, Sport::Baseball | Sport::Softball)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sport::Baseball => "baseball",
            Sport::Softball => "softball",
            Sport::Basketball => "basketball",
            Sport::Soccer => "soccer",
            Sport::Volleyball => "volleyball",
            Sport::Football => "football",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Sport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseball" => Ok(Sport::Baseball),
            "softball" => Ok(Sport::Softball),
            "basketball" | "mbb" | "wbb" => Ok(Sport::Basketball),
            "soccer" => Ok(Sport::Soccer),
            "volleyball" => Ok(Sport::Volleyball),
            "football" => Ok(Sport::Football),
            other => Err(Error::UnknownSport(other.to_string())),
        }
    }
}

/// One athlete from the team roster. The roster is authoritative for who
/// is on the team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Jersey as printed ("0" and "00" are distinct)
    pub jersey: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Position abbreviation
    #[serde(default)]
    pub position: String,
    /// Height as printed
    #[serde(default)]
    pub height: String,
    /// Weight as printed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Class year (Fr., So., ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_year: Option<String>,
    /// Hometown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hometown: Option<String>,
}

impl RosterPlayer {
    /// Roster entry with the required fields.
    pub fn new(jersey: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            jersey: jersey.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Set the position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Stats for one athlete as printed in the source, keyed by the jersey and
/// name found there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawStatRecord {
    /// Jersey as printed
    pub jersey: String,
    /// Name as printed ("Smith, Mike", "M. Smith", ...)
    pub name: String,
    /// Sport-specific stats
    pub stats: SportStats,
}

impl RawStatRecord {
    /// Create a record.
    pub fn new(jersey: impl Into<String>, name: impl Into<String>, stats: SportStats) -> Self {
        Self {
            jersey: jersey.into(),
            name: name.into(),
            stats,
        }
    }
}

/// Sport-specific stat payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "sport", rename_all = "lowercase")]
pub enum SportStats {
    /// Baseball or softball
    Baseball(BaseballStats),
    /// Basketball
    Basketball(BasketballStats),
    /// Soccer
    Soccer(SoccerStats),
    /// Volleyball
    Volleyball(VolleyballStats),
    /// Football
    Football(FootballStats),
}

/// Innings pitched: whole innings plus outs (0..=2) of a partial inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Innings {
    /// Complete innings
    pub full: u32,
    /// Extra outs
    pub partial: u8,
}

impl Innings {
    /// Parse `45.2` style notation. The fraction digit counts outs and must
    /// be 0, 1 or 2.
    ///
    /// ```
    /// use statsheet::records::Innings;
    ///
    /// assert_eq!(Innings::parse("45.2"), Some(Innings { full: 45, partial: 2 }));
    /// assert_eq!(Innings::parse("7"), Some(Innings { full: 7, partial: 0 }));
    /// assert_eq!(Innings::parse("3.5"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, "0"),
        };
        let full = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let partial: u8 = frac.parse().ok()?;
        (partial <= 2).then_some(Self { full, partial })
    }

    /// Innings as a decimal number of innings (45.2 is 45⅔).
    pub fn as_f64(&self) -> f64 {
        self.full as f64 + self.partial as f64 / 3.0
    }

    /// True for zero innings.
    pub fn is_zero(&self) -> bool {
        self.full == 0 && self.partial == 0
    }
}

impl fmt::Display for Innings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.full, self.partial)
    }
}

/// Baseball/softball batting line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BattingLine {
    /// Batting average
    pub avg: Option<f64>,
    /// Games played
    pub gp: Option<u32>,
    /// Games started
    pub gs: Option<u32>,
    /// At bats
    pub ab: Option<u32>,
    /// Runs
    pub r: Option<u32>,
    /// Hits
    pub h: Option<u32>,
    /// Doubles
    pub doubles: Option<u32>,
    /// Triples
    pub triples: Option<u32>,
    /// Home runs
    pub hr: Option<u32>,
    /// Runs batted in
    pub rbi: Option<u32>,
    /// Total bases
    pub tb: Option<u32>,
    /// Slugging percentage
    pub slg: Option<f64>,
    /// Walks
    pub bb: Option<u32>,
    /// Hit by pitch
    pub hbp: Option<u32>,
    /// Strikeouts
    pub so: Option<u32>,
    /// Grounded into double play
    pub gdp: Option<u32>,
    /// On-base percentage
    pub obp: Option<f64>,
    /// Sacrifice flies
    pub sf: Option<u32>,
    /// Sacrifice hits
    pub sh: Option<u32>,
    /// Stolen bases
    pub sb: Option<u32>,
    /// Stolen base attempts
    pub sb_att: Option<u32>,
}

/// Baseball/softball pitching line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PitchingLine {
    /// Earned run average
    pub era: Option<f64>,
    /// Wins
    pub w: Option<u32>,
    /// Losses
    pub l: Option<u32>,
    /// Appearances
    pub app: Option<u32>,
    /// Games started
    pub gs: Option<u32>,
    /// Complete games
    pub cg: Option<u32>,
    /// Shutouts
    pub sho: Option<u32>,
    /// Saves
    pub sv: Option<u32>,
    /// Innings pitched
    pub ip: Option<Innings>,
    /// Hits allowed
    pub h: Option<u32>,
    /// Runs allowed
    pub r: Option<u32>,
    /// Earned runs
    pub er: Option<u32>,
    /// Walks
    pub bb: Option<u32>,
    /// Strikeouts
    pub so: Option<u32>,
}

/// Baseball/softball record: a player may bat, pitch, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseballStats {
    /// Batting line
    pub batting: Option<BattingLine>,
    /// Pitching line
    pub pitching: Option<PitchingLine>,
}

/// Basketball season line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasketballStats {
    /// Games played
    pub gp: Option<u32>,
    /// Games started
    pub gs: Option<u32>,
    /// Total minutes
    pub min: Option<u32>,
    /// Minutes per game
    pub mpg: Option<f64>,
    /// Field goals made
    pub fgm: Option<u32>,
    /// Field goals attempted
    pub fga: Option<u32>,
    /// Field goal percentage (0-100)
    pub fg_pct: Option<f64>,
    /// Three-pointers made
    pub fg3m: Option<u32>,
    /// Three-pointers attempted
    pub fg3a: Option<u32>,
    /// Three-point percentage (0-100)
    pub fg3_pct: Option<f64>,
    /// Free throws made
    pub ftm: Option<u32>,
    /// Free throws attempted
    pub fta: Option<u32>,
    /// Free throw percentage (0-100)
    pub ft_pct: Option<f64>,
    /// Offensive rebounds
    pub oreb: Option<u32>,
    /// Defensive rebounds
    pub dreb: Option<u32>,
    /// Total rebounds
    pub reb: Option<u32>,
    /// Rebounds per game
    pub rpg: Option<f64>,
    /// Personal fouls
    pub pf: Option<u32>,
    /// Assists
    pub ast: Option<u32>,
    /// Assists per game
    pub apg: Option<f64>,
    /// Turnovers
    pub to: Option<u32>,
    /// Blocks
    pub blk: Option<u32>,
    /// Blocks per game
    pub bpg: Option<f64>,
    /// Steals
    pub stl: Option<u32>,
    /// Steals per game
    pub spg: Option<f64>,
    /// Points
    pub pts: Option<u32>,
    /// Points per game
    pub ppg: Option<f64>,
}

impl BasketballStats {
    /// Fill per-game rates that the source omitted from totals and games
    /// played.
    pub fn derive_rates(&mut self) {
        let Some(gp) = self.gp.filter(|g| *g > 0) else {
            return;
        };
        let per_game = |total: Option<u32>| total.map(|t| round1(t as f64 / gp as f64));
        self.ppg = self.ppg.or_else(|| per_game(self.pts));
        self.rpg = self.rpg.or_else(|| per_game(self.reb));
        self.apg = self.apg.or_else(|| per_game(self.ast));
        self.spg = self.spg.or_else(|| per_game(self.stl));
        self.bpg = self.bpg.or_else(|| per_game(self.blk));
        self.mpg = self.mpg.or_else(|| per_game(self.min));
    }
}

/// Soccer goalkeeping line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalkeeperLine {
    /// Minutes played
    pub min: Option<u32>,
    /// Goals allowed
    pub ga: Option<u32>,
    /// Goals against average
    pub gaa: Option<f64>,
    /// Saves
    pub saves: Option<u32>,
    /// Save percentage
    pub sv_pct: Option<f64>,
    /// Wins
    pub w: Option<u32>,
    /// Losses
    pub l: Option<u32>,
    /// Ties
    pub t: Option<u32>,
    /// Shutouts
    pub sho: Option<u32>,
}

/// Soccer season line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoccerStats {
    /// Games played
    pub gp: Option<u32>,
    /// Games started
    pub gs: Option<u32>,
    /// Goals
    pub goals: Option<u32>,
    /// Assists
    pub assists: Option<u32>,
    /// Points
    pub points: Option<u32>,
    /// Shots
    pub shots: Option<u32>,
    /// Shots on goal
    pub sog: Option<u32>,
    /// Game-winning goals
    pub gw: Option<u32>,
    /// Goalkeeping, for players listed in the goalkeeper table
    pub goalkeeping: Option<GoalkeeperLine>,
}

/// Volleyball season line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolleyballStats {
    /// Sets played
    pub sp: Option<u32>,
    /// Matches played
    pub mp: Option<u32>,
    /// Kills
    pub kills: Option<u32>,
    /// Kills per set
    pub kps: Option<f64>,
    /// Attack errors
    pub errors: Option<u32>,
    /// Total attacks
    pub attempts: Option<u32>,
    /// Hitting percentage
    pub hit_pct: Option<f64>,
    /// Assists
    pub assists: Option<u32>,
    /// Assists per set
    pub aps: Option<f64>,
    /// Service aces
    pub aces: Option<u32>,
    /// Service errors
    pub service_errors: Option<u32>,
    /// Digs
    pub digs: Option<u32>,
    /// Digs per set
    pub dps: Option<f64>,
    /// Solo blocks
    pub block_solo: Option<u32>,
    /// Block assists
    pub block_assists: Option<u32>,
    /// Weighted blocks: solo + half of assists
    pub blocks: Option<f64>,
    /// Blocks per set
    pub bps: Option<f64>,
    /// Points: kills + aces + solo blocks + half of block assists
    pub points: Option<f64>,
}

impl VolleyballStats {
    /// Fill derived values the source omitted: weighted blocks, points,
    /// hitting percentage and per-set rates.
    pub fn derive(&mut self) {
        let solo = self.block_solo.map(f64::from);
        let assists = self.block_assists.map(f64::from);
        if self.blocks.is_none() && (solo.is_some() || assists.is_some()) {
            self.blocks = Some(solo.unwrap_or(0.0) + 0.5 * assists.unwrap_or(0.0));
        }
        if self.points.is_none() && (self.kills.is_some() || self.aces.is_some() || self.blocks.is_some()) {
            self.points = Some(
                self.kills.map_or(0.0, f64::from)
                    + self.aces.map_or(0.0, f64::from)
                    + self.blocks.unwrap_or(0.0),
            );
        }
        if self.hit_pct.is_none() {
            if let (Some(k), Some(e), Some(ta)) = (self.kills, self.errors, self.attempts) {
                if ta > 0 {
                    self.hit_pct = Some(round3((k as f64 - e as f64) / ta as f64));
                }
            }
        }
        if let Some(sp) = self.sp.filter(|s| *s > 0) {
            let per_set = |v: Option<f64>| v.map(|v| round2(v / sp as f64));
            self.kps = self.kps.or_else(|| per_set(self.kills.map(f64::from)));
            self.aps = self.aps.or_else(|| per_set(self.assists.map(f64::from)));
            self.dps = self.dps.or_else(|| per_set(self.digs.map(f64::from)));
            self.bps = self.bps.or_else(|| per_set(self.blocks));
        }
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_from_str() {
        assert_eq!("Softball".parse::<Sport>().unwrap(), Sport::Softball);
        assert!(matches!("curling".parse::<Sport>(), Err(Error::UnknownSport(_))));
        assert!(Sport::Baseball.is_diamond());
        assert!(!Sport::Soccer.is_diamond());
    }

    #[test]
    fn test_innings() {
        let ip = Innings::parse("12.1").unwrap();
        assert!((ip.as_f64() - 12.3333).abs() < 1e-3);
        assert_eq!(ip.to_string(), "12.1");
        assert_eq!(Innings::parse(".2"), Some(Innings { full: 0, partial: 2 }));
        assert!(Innings::parse("0.0").unwrap().is_zero());
        assert_eq!(Innings::parse("x"), None);
    }

    #[test]
    fn test_basketball_rates() {
        let mut stats = BasketballStats {
            gp: Some(4),
            pts: Some(50),
            reb: Some(9),
            ppg: Some(99.0),
            ..Default::default()
        };
        stats.derive_rates();
        assert_eq!(stats.ppg, Some(99.0));
        assert_eq!(stats.rpg, Some(2.3));
        assert_eq!(stats.apg, None);
    }

    #[test]
    fn test_volleyball_weighted_blocks_and_points() {
        let mut stats = VolleyballStats {
            sp: Some(10),
            kills: Some(40),
            errors: Some(10),
            attempts: Some(100),
            aces: Some(5),
            block_solo: Some(3),
            block_assists: Some(9),
            ..Default::default()
        };
        stats.derive();
        assert_eq!(stats.blocks, Some(7.5));
        assert_eq!(stats.points, Some(52.5));
        assert_eq!(stats.hit_pct, Some(0.3));
        assert_eq!(stats.kps, Some(4.0));
        assert_eq!(stats.bps, Some(0.75));
    }

    #[test]
    fn test_roster_deserialize_defaults() {
        let p: RosterPlayer =
            serde_json::from_str(r#"{"jersey":"00","first_name":"Ana","last_name":"Diaz"}"#).unwrap();
        assert_eq!(p.jersey, "00");
        assert_eq!(p.position, "");
        assert_eq!(p.full_name(), "Ana Diaz");
    }
}
