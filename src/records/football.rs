//! Football stat lines. A player carries only the sections they appear in.

use serde::Serialize;

/// Rushing: gp att gain loss net avg td long avg/g.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RushingLine {
    /// Games played
    pub gp: Option<u32>,
    /// Attempts
    pub att: Option<u32>,
    /// Yards gained
    pub gain: Option<i32>,
    /// Yards lost
    pub loss: Option<i32>,
    /// Net yards
    pub net: Option<i32>,
    /// Yards per carry
    pub avg: Option<f64>,
    /// Touchdowns
    pub td: Option<u32>,
    /// Longest run
    pub long: Option<i32>,
    /// Yards per game
    pub avg_per_game: Option<f64>,
}

/// Passing: gp effic cmp-att-int pct yds td lng avg/g.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassingLine {
    /// Games played
    pub gp: Option<u32>,
    /// Passing efficiency rating
    pub efficiency: Option<f64>,
    /// Completions
    pub cmp: Option<u32>,
    /// Attempts
    pub att: Option<u32>,
    /// Interceptions thrown
    pub int: Option<u32>,
    /// Completion percentage
    pub pct: Option<f64>,
    /// Yards
    pub yds: Option<i32>,
    /// Touchdowns
    pub td: Option<u32>,
    /// Longest completion
    pub long: Option<i32>,
    /// Yards per game
    pub avg_per_game: Option<f64>,
}

/// Receiving: gp no yds avg td long avg/g.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReceivingLine {
    /// Games played
    pub gp: Option<u32>,
    /// Receptions
    pub no: Option<u32>,
    /// Yards
    pub yds: Option<i32>,
    /// Yards per catch
    pub avg: Option<f64>,
    /// Touchdowns
    pub td: Option<u32>,
    /// Longest reception
    pub long: Option<i32>,
    /// Yards per game
    pub avg_per_game: Option<f64>,
}

/// Punt or kick returns: no yds avg td long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReturnLine {
    /// Returns
    pub no: Option<u32>,
    /// Yards
    pub yds: Option<i32>,
    /// Average
    pub avg: Option<f64>,
    /// Touchdowns
    pub td: Option<u32>,
    /// Longest return
    pub long: Option<i32>,
}

/// Scoring: td fg kick(made-att) rush rcv pass dxp saf pts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringLine {
    /// Touchdowns
    pub td: Option<u32>,
    /// Field goals
    pub fg: Option<u32>,
    /// Kick PATs made
    pub kick_made: Option<u32>,
    /// Kick PATs attempted
    pub kick_att: Option<u32>,
    /// Two-point rushes
    pub rush: Option<u32>,
    /// Two-point receptions
    pub rcv: Option<u32>,
    /// Two-point passes
    pub pass: Option<u32>,
    /// Defensive extra points
    pub dxp: Option<u32>,
    /// Safeties
    pub saf: Option<u32>,
    /// Points
    pub pts: Option<u32>,
}

/// Field goals: fgm-fga pct ... long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldGoalLine {
    /// Made
    pub made: Option<u32>,
    /// Attempted
    pub att: Option<u32>,
    /// Percentage
    pub pct: Option<f64>,
    /// Longest make
    pub long: Option<i32>,
}

/// Punting: no yds avg long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PuntingLine {
    /// Punts
    pub no: Option<u32>,
    /// Yards
    pub yds: Option<i32>,
    /// Average
    pub avg: Option<f64>,
    /// Longest punt
    pub long: Option<i32>,
}

/// Defense: gp solo ast total tfl-yds sacks-yds int-yds brup qbh ff fr.
///
/// Half-sack and half-TFL values are printed as decimals, so those are
/// kept as `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefenseLine {
    /// Games played
    pub gp: Option<u32>,
    /// Solo tackles
    pub solo: Option<u32>,
    /// Assisted tackles
    pub ast: Option<u32>,
    /// Total tackles
    pub total: Option<f64>,
    /// Tackles for loss
    pub tfl: Option<f64>,
    /// TFL yards
    pub tfl_yds: Option<i32>,
    /// Sacks
    pub sacks: Option<f64>,
    /// Sack yards
    pub sack_yds: Option<i32>,
    /// Interceptions
    pub int: Option<u32>,
    /// Interception return yards
    pub int_yds: Option<i32>,
    /// Pass breakups
    pub brup: Option<u32>,
    /// QB hurries
    pub qbh: Option<u32>,
    /// Forced fumbles
    pub ff: Option<u32>,
    /// Fumble recoveries
    pub fr: Option<u32>,
}

/// All football sections for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FootballStats {
    /// Rushing
    pub rushing: Option<RushingLine>,
    /// Passing
    pub passing: Option<PassingLine>,
    /// Receiving
    pub receiving: Option<ReceivingLine>,
    /// Punt returns
    pub punt_returns: Option<ReturnLine>,
    /// Kick returns
    pub kick_returns: Option<ReturnLine>,
    /// Scoring
    pub scoring: Option<ScoringLine>,
    /// Field goals
    pub field_goals: Option<FieldGoalLine>,
    /// Punting
    pub punting: Option<PuntingLine>,
    /// Defense
    pub defense: Option<DefenseLine>,
}

impl FootballStats {
    /// True when no section is present.
    pub fn is_empty(&self) -> bool {
        self.rushing.is_none()
            && self.passing.is_none()
            && self.receiving.is_none()
            && self.punt_returns.is_none()
            && self.kick_returns.is_none()
            && self.scoring.is_none()
            && self.field_goals.is_none()
            && self.punting.is_none()
            && self.defense.is_none()
    }
}
