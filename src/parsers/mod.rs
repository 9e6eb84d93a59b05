//! Sport parsers: rows in, sparse stat records out.
//!
//! Parsers never fail on a single row. Rows they cannot read are skipped and,
//! where useful, reported as a [`ParseWarning`] in the returned
//! [`ParseReport`].

pub mod baseball;
pub mod basketball;
pub mod football;
pub mod soccer;
pub mod values;
pub mod volleyball;

use crate::config::{ColumnTable, DocumentFamily, ExtractionProfile};
use crate::error::ParseWarning;
use crate::layout::{extract_rows, map_row, MappedRow, Row};
use crate::records::{RawStatRecord, Sport};
use indexmap::IndexMap;
use serde::Serialize;

pub use football::Section;

/// Records plus the non-fatal conditions seen while producing them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport<T> {
    /// Parsed records in document order
    pub records: Vec<T>,
    /// Warnings collected along the way
    pub warnings: Vec<ParseWarning>,
}

impl<T> Default for ParseReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<T> ParseReport<T> {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: ParseWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// True when no records were produced.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a `MalformedDocument` warning when nothing was parsed.
    pub(crate) fn require_records(&mut self, reason: &str) {
        if self.records.is_empty() {
            self.warn(ParseWarning::MalformedDocument {
                reason: reason.to_string(),
            });
        }
    }
}

/// Generated identifier for an athlete in an [`AthleteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AthleteId(pub usize);

/// Owned accumulation table keyed by `(jersey, name)` as printed.
///
/// Sections of one document mention the same athlete several times; each
/// mention upserts into the same entry, and entries keep first-seen order.
#[derive(Debug, Clone)]
pub struct AthleteTable<T> {
    index: IndexMap<(String, String), AthleteId>,
    entries: Vec<T>,
}

impl<T> Default for AthleteTable<T> {
    fn default() -> Self {
        Self {
            index: IndexMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T: Default> AthleteTable<T> {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `(jersey, name)`, inserting a default entry on first sight.
    pub fn id(&mut self, jersey: &str, name: &str) -> AthleteId {
        let key = (jersey.to_string(), name.to_string());
        if let Some(id) = self.index.get(&key) {
            return *id;
        }
        let id = AthleteId(self.entries.len());
        self.entries.push(T::default());
        self.index.insert(key, id);
        id
    }

    /// Mutable entry for `(jersey, name)`, inserted if absent.
    pub fn upsert(&mut self, jersey: &str, name: &str) -> &mut T {
        let id = self.id(jersey, name);
        &mut self.entries[id.0]
    }

    /// Entry by id.
    pub fn get(&self, id: AthleteId) -> Option<&T> {
        self.entries.get(id.0)
    }

    /// Number of athletes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into `(jersey, name, entry)` in first-seen order.
    pub fn into_entries(self) -> Vec<(String, String, T)> {
        let mut entries: Vec<Option<T>> = self.entries.into_iter().map(Some).collect();
        self.index
            .into_iter()
            .filter_map(|((jersey, name), id)| entries[id.0].take().map(|e| (jersey, name, e)))
            .collect()
    }
}

/// A row read through a column table that identifies an athlete.
pub(crate) struct AthleteRow {
    pub jersey: String,
    pub name: String,
    pub cells: MappedRow,
}

/// Map a row and keep it only if it carries a jersey and a name. Summary
/// lines are dropped here.
pub(crate) fn athlete_row(row: &Row, table: &ColumnTable) -> Option<AthleteRow> {
    if values::is_summary(&row.text()) {
        return None;
    }
    let cells = map_row(row, &table.ranges);
    let jersey = values::jersey(cells.get("jersey"))?;
    let name = table
        .ranges
        .iter()
        .find(|r| r.field == "name")
        .map(|r| values::joined_text(row, r))
        .unwrap_or_default();
    if name.is_empty() || values::is_summary(&name) {
        return None;
    }
    Some(AthleteRow { jersey, name, cells })
}

/// Parse extracted rows according to the profile.
pub fn parse_rows(rows: &[Row], profile: &ExtractionProfile) -> ParseReport<RawStatRecord> {
    let calibration = &profile.calibration;
    let mut report = match profile.sport {
        Sport::Baseball | Sport::Softball => match profile.family {
            DocumentFamily::Columnar => baseball::parse_columnar(rows, calibration),
            DocumentFamily::FusedDigits => baseball::parse_fused(rows),
        },
        Sport::Basketball => basketball::parse(rows, calibration),
        Sport::Soccer => soccer::parse(rows, calibration),
        Sport::Volleyball => volleyball::parse(rows, calibration),
        Sport::Football => football::parse(rows),
    };
    log::info!(
        "{}: {} records from {} rows ({} warnings)",
        profile.sport,
        report.records.len(),
        rows.len(),
        report.warnings.len()
    );
    report.require_records("no athlete rows recognized");
    report
}

/// Extract rows from PDF bytes and parse them.
///
/// An unreadable or text-less document yields an empty report with a
/// `MalformedDocument` warning.
pub fn parse_document(data: &[u8], profile: &ExtractionProfile) -> ParseReport<RawStatRecord> {
    let rows = extract_rows(data, &profile.layout);
    if rows.is_empty() {
        let mut report = ParseReport::new();
        report.warn(ParseWarning::MalformedDocument {
            reason: "no text rows extracted".to_string(),
        });
        return report;
    }
    parse_rows(&rows, profile)
}
