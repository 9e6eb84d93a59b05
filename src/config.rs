//! Extraction configuration.
//!
//! Column tables are data: each is an ordered list of named `[x_min, x_max)`
//! ranges calibrated against one document family. The built-in tables match
//! the common stat sheet export layout; a JSON calibration file can replace
//! any of them without touching the parsers.

use crate::error::{Error, Result};
use crate::layout::FieldRange;
use crate::records::Sport;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default baseline tolerance for row clustering.
pub const DEFAULT_ROW_TOLERANCE: f32 = 3.0;

/// Largest accepted row tolerance.
pub const MAX_ROW_TOLERANCE: f32 = 5.0;

/// Default number of summary stats per athlete.
pub const DEFAULT_STAT_COLUMNS: usize = 3;

/// Row clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Baselines closer than this belong to the same row
    pub row_tolerance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_tolerance: DEFAULT_ROW_TOLERANCE,
        }
    }
}

impl LayoutConfig {
    /// Create a layout config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless `0 < row_tolerance <= 5`.
    pub fn new(row_tolerance: f32) -> Result<Self> {
        if !(row_tolerance > 0.0 && row_tolerance <= MAX_ROW_TOLERANCE) {
            return Err(Error::InvalidConfig(format!(
                "row tolerance {} outside (0, {}]",
                row_tolerance, MAX_ROW_TOLERANCE
            )));
        }
        Ok(Self { row_tolerance })
    }
}

/// Which parser handles a baseball/softball document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFamily {
    /// One token per column; read with the column mapper
    #[default]
    Columnar,
    /// Adjacent numeric columns fused into single tokens
    FusedDigits,
}

impl std::str::FromStr for DocumentFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "columnar" => Ok(Self::Columnar),
            "fused" | "fused_digits" | "fused-digits" => Ok(Self::FusedDigits),
            other => Err(Error::InvalidConfig(format!("unknown document family '{}'", other))),
        }
    }
}

/// Identifies one calibrated column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKey {
    /// Baseball/softball batting section
    BaseballBatting,
    /// Baseball/softball pitching section
    BaseballPitching,
    /// Basketball player table
    Basketball,
    /// Soccer field players
    SoccerField,
    /// Soccer goalkeepers
    SoccerGoalkeeper,
    /// Volleyball player table
    Volleyball,
}

impl TableKey {
    /// Every key, in calibration file order.
    pub const ALL: [TableKey; 6] = [
        TableKey::BaseballBatting,
        TableKey::BaseballPitching,
        TableKey::Basketball,
        TableKey::SoccerField,
        TableKey::SoccerGoalkeeper,
        TableKey::Volleyball,
    ];

    /// Key used in calibration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKey::BaseballBatting => "baseball.batting",
            TableKey::BaseballPitching => "baseball.pitching",
            TableKey::Basketball => "basketball",
            TableKey::SoccerField => "soccer.field",
            TableKey::SoccerGoalkeeper => "soccer.goalkeeper",
            TableKey::Volleyball => "volleyball",
        }
    }
}

/// A versioned, named column range table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTable {
    /// Table name
    pub name: String,
    /// Calibration revision
    pub version: String,
    /// Ordered field ranges
    pub ranges: Vec<FieldRange>,
}

impl ColumnTable {
    fn from_static(name: &str, ranges: &[(&str, f32, f32)]) -> Self {
        Self {
            name: name.to_string(),
            version: BUILTIN_VERSION.to_string(),
            ranges: ranges
                .iter()
                .map(|&(field, lo, hi)| FieldRange::new(field, lo, hi))
                .collect(),
        }
    }

    /// Reject empty tables and inverted ranges.
    pub fn validate(&self) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(Error::InvalidConfig(format!("column table '{}' has no ranges", self.name)));
        }
        if let Some(bad) = self.ranges.iter().find(|r| !(r.x_min < r.x_max)) {
            return Err(Error::InvalidConfig(format!(
                "column table '{}': field '{}' has empty range [{}, {})",
                self.name, bad.field, bad.x_min, bad.x_max
            )));
        }
        Ok(())
    }
}

const BUILTIN_VERSION: &str = "builtin-1";

const BATTING: &[(&str, f32, f32)] = &[
    ("jersey", 20.0, 40.0),
    ("name", 40.0, 150.0),
    ("avg", 150.0, 180.0),
    ("gp_gs", 180.0, 215.0),
    ("ab", 215.0, 240.0),
    ("r", 240.0, 262.0),
    ("h", 262.0, 284.0),
    ("2b", 284.0, 306.0),
    ("3b", 306.0, 328.0),
    ("hr", 328.0, 350.0),
    ("rbi", 350.0, 374.0),
    ("tb", 374.0, 398.0),
    ("slg", 398.0, 428.0),
    ("bb", 428.0, 450.0),
    ("hbp", 450.0, 472.0),
    ("so", 472.0, 494.0),
    ("gdp", 494.0, 516.0),
    ("obp", 516.0, 546.0),
    ("sf", 546.0, 568.0),
    ("sh", 568.0, 590.0),
    ("sb_att", 590.0, 625.0),
];

const PITCHING: &[(&str, f32, f32)] = &[
    ("jersey", 20.0, 40.0),
    ("name", 40.0, 150.0),
    ("era", 150.0, 180.0),
    ("w_l", 180.0, 210.0),
    ("app_gs", 210.0, 240.0),
    ("cg", 240.0, 260.0),
    ("sho", 260.0, 285.0),
    ("sv", 285.0, 305.0),
    ("ip", 305.0, 340.0),
    ("h", 340.0, 362.0),
    ("r", 362.0, 384.0),
    ("er", 384.0, 406.0),
    ("bb", 406.0, 428.0),
    ("so", 428.0, 450.0),
];

const BASKETBALL: &[(&str, f32, f32)] = &[
    ("jersey", 20.0, 40.0),
    ("name", 40.0, 150.0),
    ("gp_gs", 150.0, 185.0),
    ("min", 185.0, 215.0),
    ("avg_min", 215.0, 245.0),
    ("fg", 245.0, 285.0),
    ("fg_pct", 285.0, 315.0),
    ("fg3", 315.0, 350.0),
    ("fg3_pct", 350.0, 380.0),
    ("ft", 380.0, 415.0),
    ("ft_pct", 415.0, 445.0),
    ("oreb", 445.0, 465.0),
    ("dreb", 465.0, 485.0),
    ("reb", 485.0, 510.0),
    ("avg_reb", 510.0, 540.0),
    ("pf", 540.0, 560.0),
    ("dq", 560.0, 575.0),
    ("ast", 575.0, 600.0),
    ("to", 600.0, 625.0),
    ("blk", 625.0, 648.0),
    ("stl", 648.0, 670.0),
    ("pts", 670.0, 700.0),
    ("avg_pts", 700.0, 735.0),
];

const SOCCER_FIELD: &[(&str, f32, f32)] = &[
    ("jersey", 20.0, 40.0),
    ("name", 40.0, 150.0),
    ("gp_gs", 150.0, 185.0),
    ("g", 185.0, 210.0),
    ("a", 210.0, 235.0),
    ("pts", 235.0, 260.0),
    ("sh", 260.0, 285.0),
    ("sh_pct", 285.0, 315.0),
    ("sog", 315.0, 340.0),
    ("sog_pct", 340.0, 370.0),
    ("gw", 370.0, 395.0),
    ("pk_att", 395.0, 430.0),
];

const SOCCER_GOALKEEPER: &[(&str, f32, f32)] = &[
    ("jersey", 20.0, 40.0),
    ("name", 40.0, 150.0),
    ("gp_gs", 150.0, 185.0),
    ("min", 185.0, 225.0),
    ("ga", 225.0, 250.0),
    ("gaa", 250.0, 280.0),
    ("saves", 280.0, 310.0),
    ("sv_pct", 310.0, 340.0),
    ("w_l_t", 340.0, 385.0),
    ("sho", 385.0, 410.0),
];

const VOLLEYBALL: &[(&str, f32, f32)] = &[
    ("jersey", 20.0, 40.0),
    ("name", 40.0, 150.0),
    ("sp", 150.0, 172.0),
    ("mp", 172.0, 194.0),
    ("k", 194.0, 220.0),
    ("k_per_s", 220.0, 248.0),
    ("e", 248.0, 270.0),
    ("ta", 270.0, 298.0),
    ("pct", 298.0, 328.0),
    ("a", 328.0, 354.0),
    ("a_per_s", 354.0, 382.0),
    ("sa", 382.0, 404.0),
    ("se", 404.0, 426.0),
    ("sa_per_s", 426.0, 454.0),
    ("re", 454.0, 476.0),
    ("dig", 476.0, 502.0),
    ("d_per_s", 502.0, 530.0),
    ("bs", 530.0, 552.0),
    ("ba", 552.0, 574.0),
    ("blk", 574.0, 600.0),
    ("b_per_s", 600.0, 628.0),
    ("be", 628.0, 650.0),
    ("bhe", 650.0, 672.0),
    ("pts", 672.0, 705.0),
];

lazy_static::lazy_static! {
    static ref BUILTIN_TABLES: IndexMap<&'static str, ColumnTable> = {
        let mut tables = IndexMap::new();
        for key in TableKey::ALL {
            let ranges = match key {
                TableKey::BaseballBatting => BATTING,
                TableKey::BaseballPitching => PITCHING,
                TableKey::Basketball => BASKETBALL,
                TableKey::SoccerField => SOCCER_FIELD,
                TableKey::SoccerGoalkeeper => SOCCER_GOALKEEPER,
                TableKey::Volleyball => VOLLEYBALL,
            };
            tables.insert(key.as_str(), ColumnTable::from_static(key.as_str(), ranges));
        }
        tables
    };
}

/// Built-in table for `key`.
pub fn builtin_table(key: TableKey) -> &'static ColumnTable {
    // Every key is inserted when the map is built.
    &BUILTIN_TABLES[key.as_str()]
}

/// The full set of column tables in use.
///
/// Tables not overridden by a calibration file are the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    #[serde(default)]
    tables: IndexMap<String, ColumnTable>,
}

impl Calibration {
    /// Calibration using only the built-in tables.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Parse a calibration file body.
    ///
    /// The JSON is an object with a `tables` map from table key (such as
    /// `"baseball.batting"`) to a [`ColumnTable`]. Unknown keys are ignored
    /// with a warning.
    ///
    /// ```
    /// use statsheet::config::{Calibration, TableKey};
    ///
    /// let json = r#"{"tables": {"volleyball": {"name": "vb", "version": "2024",
    ///     "ranges": [{"field": "jersey", "x_min": 0, "x_max": 10}]}}}"#;
    /// let cal = Calibration::from_json(json).unwrap();
    /// assert_eq!(cal.table(TableKey::Volleyball).version, "2024");
    /// assert_eq!(cal.table(TableKey::Basketball).version, "builtin-1");
    /// ```
    ///
    /// # Errors
    ///
    /// Malformed JSON or a table that fails [`ColumnTable::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let mut parsed: Calibration = serde_json::from_str(json)?;
        parsed.tables.retain(|key, _| {
            let known = TableKey::ALL.iter().any(|k| k.as_str() == key);
            if !known {
                log::warn!("calibration table '{}' is not used by any parser", key);
            }
            known
        });
        for table in parsed.tables.values() {
            table.validate()?;
        }
        log::info!("calibration overrides {} table(s)", parsed.tables.len());
        Ok(parsed)
    }

    /// Load a calibration file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Override one table.
    pub fn with_table(mut self, key: TableKey, table: ColumnTable) -> Self {
        self.tables.insert(key.as_str().to_string(), table);
        self
    }

    /// Table for `key`, falling back to the built-in one.
    pub fn table(&self, key: TableKey) -> &ColumnTable {
        self.tables
            .get(key.as_str())
            .unwrap_or_else(|| builtin_table(key))
    }
}

/// Everything a parser needs to read one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionProfile {
    /// Sport of the document
    pub sport: Sport,
    /// Baseball/softball document family
    pub family: DocumentFamily,
    /// Row clustering parameters
    pub layout: LayoutConfig,
    /// Column tables
    pub calibration: Calibration,
    /// Summary stats per athlete in the display sheet
    pub columns: usize,
}

impl ExtractionProfile {
    /// Profile with built-in defaults for `sport`.
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            family: DocumentFamily::default(),
            layout: LayoutConfig::default(),
            calibration: Calibration::builtin(),
            columns: DEFAULT_STAT_COLUMNS,
        }
    }

    /// Set the document family.
    pub fn with_family(mut self, family: DocumentFamily) -> Self {
        self.family = family;
        self
    }

    /// Set the row tolerance.
    ///
    /// # Errors
    ///
    /// See [`LayoutConfig::new`].
    pub fn with_row_tolerance(mut self, tolerance: f32) -> Result<Self> {
        self.layout = LayoutConfig::new(tolerance)?;
        Ok(self)
    }

    /// Set the calibration.
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Set the number of summary stats (at least one).
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }
}
