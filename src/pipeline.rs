//! End-to-end sheet building.
//!
//! `roster + records → match → slots → collapse gaps → select stats`. The
//! result is a [`DisplaySheet`]: one row per occupied slot, single empty
//! slots, collapsed gaps, and the athletes that found no slot.

use crate::api;
use crate::config::ExtractionProfile;
use crate::error::{ParseWarning, Result};
use crate::matcher::{match_players, MatchKind, MatchedAthlete};
use crate::parsers::parse_document;
use crate::records::{RawStatRecord, RosterPlayer, Sport};
use crate::selector::{self, CatStat, FootballCategory, FOOTBALL_COLUMNS};
use crate::slots::{assign_slots, collapse_assignment, SlotRow};
use serde::Serialize;

/// Where the stats come from.
#[derive(Debug, Clone, Copy)]
pub enum StatSource<'a> {
    /// PDF bytes
    Pdf(&'a [u8]),
    /// Stats API JSON text
    Api(&'a str),
}

/// One athlete as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayAthlete {
    /// Slot number, or `None` for inactive athletes
    pub slot: Option<u8>,
    /// Jersey as shown
    pub jersey: String,
    /// "First Last"
    pub name: String,
    /// Roster position
    pub position: String,
    /// Football category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FootballCategory>,
    /// Selected stats, padded to the sheet width
    pub stats: Vec<CatStat>,
    /// How the stats were matched
    pub match_kind: Option<MatchKind>,
}

impl DisplayAthlete {
    fn from_matched(athlete: &MatchedAthlete, slot: Option<u8>, jersey: &str, width: usize, columns: usize) -> Self {
        let selection = selector::select(athlete, columns);
        let mut stats = selection.stats;
        stats.truncate(width);
        stats.resize_with(width, CatStat::blank);
        Self {
            slot,
            jersey: jersey.to_string(),
            name: athlete.roster.full_name(),
            position: athlete.roster.position.clone(),
            category: selection.category,
            stats,
            match_kind: athlete.match_kind,
        }
    }

    /// True when at least one stat column has a value.
    pub fn has_stats(&self) -> bool {
        self.stats.iter().any(|s| !s.is_blank())
    }
}

/// One row of the display sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayRow {
    /// Occupied slot
    Athlete(DisplayAthlete),
    /// A lone empty slot
    Empty {
        /// Slot number
        slot: u8,
    },
    /// Collapsed run of empty slots
    Gap {
        /// Number of empty slots
        count: usize,
        /// First slot of the run
        start_row: u8,
    },
}

/// The finished sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySheet {
    /// Sport
    pub sport: Sport,
    /// Stat columns per row
    pub columns: usize,
    /// Rows in slot order
    pub rows: Vec<DisplayRow>,
    /// Athletes without a slot
    pub inactive: Vec<DisplayAthlete>,
    /// Parse warnings from the stat source
    pub warnings: Vec<ParseWarning>,
}

impl DisplaySheet {
    /// Displayed athletes in slot order.
    pub fn athletes(&self) -> impl Iterator<Item = &DisplayAthlete> {
        self.rows.iter().filter_map(|row| match row {
            DisplayRow::Athlete(a) => Some(a),
            _ => None,
        })
    }

    /// Athlete in a given slot.
    pub fn slot(&self, number: u8) -> Option<&DisplayAthlete> {
        self.athletes().find(|a| a.slot == Some(number))
    }
}

fn sheet_width(sport: Sport, columns: usize) -> usize {
    match sport {
        Sport::Football => FOOTBALL_COLUMNS,
        _ => columns,
    }
}

/// Lay out already matched athletes.
pub fn build_sheet(sport: Sport, athletes: Vec<MatchedAthlete>, columns: usize) -> DisplaySheet {
    let width = sheet_width(sport, columns);
    let assignment = assign_slots(athletes);
    let rows = collapse_assignment(&assignment)
        .into_iter()
        .filter_map(|row| match row {
            SlotRow::Athlete { slot } => {
                let occupant = assignment.slot(slot)?;
                let athlete = occupant.athlete.as_ref()?;
                Some(DisplayRow::Athlete(DisplayAthlete::from_matched(
                    athlete,
                    Some(slot),
                    &occupant.display_jersey,
                    width,
                    columns,
                )))
            },
            SlotRow::Empty { slot } => Some(DisplayRow::Empty { slot }),
            SlotRow::Gap { count, start_row } => Some(DisplayRow::Gap { count, start_row }),
        })
        .collect();
    let inactive = assignment
        .inactive
        .iter()
        .map(|a| DisplayAthlete::from_matched(a, None, a.roster.jersey.trim(), width, columns))
        .collect();
    DisplaySheet {
        sport,
        columns: width,
        rows,
        inactive,
        warnings: Vec::new(),
    }
}

/// Match records against a roster and lay out the sheet.
pub fn sheet_from_records(
    roster: &[RosterPlayer],
    records: Vec<RawStatRecord>,
    profile: &ExtractionProfile,
) -> DisplaySheet {
    let matched = match_players(roster, records);
    build_sheet(profile.sport, matched, profile.columns)
}

/// Parse a PDF and lay out the sheet. Never fails; problems with the
/// document surface as warnings and athletes without stats.
pub fn sheet_from_pdf(roster: &[RosterPlayer], data: &[u8], profile: &ExtractionProfile) -> DisplaySheet {
    let report = parse_document(data, profile);
    let mut sheet = sheet_from_records(roster, report.records, profile);
    sheet.warnings = report.warnings;
    sheet
}

/// Map stats API JSON and lay out the sheet.
///
/// With a roster the API records are matched against it; without one the
/// API's own player list is the roster.
///
/// # Errors
///
/// Malformed JSON or a sport the API does not cover.
pub fn sheet_from_api(roster: Option<&[RosterPlayer]>, json: &str, profile: &ExtractionProfile) -> Result<DisplaySheet> {
    let athletes = api::adapt_json(profile.sport, json)?;
    let sheet = match roster {
        Some(roster) => {
            let records = athletes.into_iter().filter_map(|a| a.stats).collect();
            sheet_from_records(roster, records, profile)
        },
        None => {
            let matched = athletes
                .into_iter()
                .map(|a| MatchedAthlete {
                    roster: a.roster,
                    match_kind: a.stats.as_ref().map(|_| MatchKind::Jersey),
                    stats: a.stats,
                })
                .collect();
            build_sheet(profile.sport, matched, profile.columns)
        },
    };
    Ok(sheet)
}

/// Build a sheet from either kind of source.
///
/// # Errors
///
/// Only API sources can fail; see [`sheet_from_api`].
pub fn build(roster: &[RosterPlayer], source: StatSource<'_>, profile: &ExtractionProfile) -> Result<DisplaySheet> {
    match source {
        StatSource::Pdf(data) => Ok(sheet_from_pdf(roster, data, profile)),
        StatSource::Api(json) => {
            let roster = (!roster.is_empty()).then_some(roster);
            sheet_from_api(roster, json, profile)
        },
    }
}
