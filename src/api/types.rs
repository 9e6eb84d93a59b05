//! Wire types of the stats API response.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    /// One entry per athlete
    #[serde(default)]
    pub data: Vec<ApiPlayer>,
}

/// One athlete with optional statistics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiPlayer {
    /// Jersey as a string or a number
    #[serde(default)]
    pub jersey_no: Option<Value>,
    /// First name
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name
    #[serde(default)]
    pub last_name: Option<String>,
    /// Position abbreviation
    #[serde(default)]
    pub position: Option<String>,
    /// Statistics wrapper
    #[serde(default)]
    pub statistic: Option<ApiStatistic>,
}

impl ApiPlayer {
    /// Jersey as text; numbers are printed without a fraction.
    pub fn jersey(&self) -> Option<String> {
        match self.jersey_no.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => n
                .as_u64()
                .map(|n| n.to_string())
                .or_else(|| n.as_f64().map(|f| format!("{}", f.trunc() as i64))),
            _ => None,
        }
    }

    /// First season entry, if any.
    pub fn season(&self) -> Option<&SeasonEntry> {
        match self.statistic.as_ref()?.data.as_ref()?.season.as_ref()? {
            Season::Entries(entries) => entries.first(),
            Season::Single(entry) => Some(entry),
        }
    }
}

/// `statistic` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStatistic {
    /// Nested data
    #[serde(default)]
    pub data: Option<ApiStatData>,
}

/// `statistic.data` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStatData {
    /// Season-scoped stats
    #[serde(default)]
    pub season: Option<Season>,
}

/// The season field appears both as an array and as a single object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Season {
    /// `season: [ {...}, ... ]`
    Entries(Vec<SeasonEntry>),
    /// `season: {...}`
    Single(SeasonEntry),
}

/// One season entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonEntry {
    /// Stat column groups
    #[serde(default)]
    pub columns: Vec<StatColumn>,
}

impl SeasonEntry {
    /// All columns merged; earlier columns win on key collisions.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = Map::new();
        for column in &self.columns {
            for (key, value) in &column.statistic {
                merged.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        merged
    }
}

/// One column group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatColumn {
    /// Raw stat key/value pairs
    #[serde(default)]
    pub statistic: Map<String, Value>,
}
