//! Canonical 1–99 display slots.
//!
//! Jerseys `"1"`–`"98"` map to the slot of the same number, `"0"` to 90 and
//! `"00"` to 99. Everything else is invalid. When several athletes share a
//! jersey the one with stats keeps the natural slot; the others, and every
//! invalid jersey, are queued in roster order and take the lowest free slot.
//! Athletes left over when all slots are taken become inactive. No athlete
//! is ever dropped.

use crate::matcher::MatchedAthlete;
use serde::Serialize;

/// Number of display slots.
pub const SLOT_COUNT: usize = 99;

/// Shortest run of empty slots collapsed into one gap row.
pub const MIN_GAP: usize = 4;

/// Slot for a jersey, or `None` for an invalid jersey.
///
/// ```
/// use statsheet::slots::jersey_to_slot;
///
/// assert_eq!(jersey_to_slot("0"), Some(90));
/// assert_eq!(jersey_to_slot("00"), Some(99));
/// assert_eq!(jersey_to_slot("7"), Some(7));
/// assert_eq!(jersey_to_slot("150"), None);
/// ```
pub fn jersey_to_slot(jersey: &str) -> Option<u8> {
    let j = jersey.trim();
    match j {
        "0" => return Some(90),
        "00" => return Some(99),
        _ => {},
    }
    if j.is_empty() || j.len() > 2 || j.starts_with('0') || !j.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u8 = j.parse().ok()?;
    (1..=98).contains(&n).then_some(n)
}

/// One display slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    /// Slot number, 1–99
    pub number: u8,
    /// Jersey shown for the occupant; empty when vacant
    pub display_jersey: String,
    /// Occupant
    pub athlete: Option<MatchedAthlete>,
}

impl Slot {
    fn vacant(number: u8) -> Self {
        Self {
            number,
            display_jersey: String::new(),
            athlete: None,
        }
    }

    /// True when nobody occupies the slot.
    pub fn is_empty(&self) -> bool {
        self.athlete.is_none()
    }
}

/// Result of slot assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotAssignment {
    /// Slots 1–99 in order
    pub slots: Vec<Slot>,
    /// Athletes with no free slot, in discovery order
    pub inactive: Vec<MatchedAthlete>,
}

impl SlotAssignment {
    /// Slot by number.
    pub fn slot(&self, number: u8) -> Option<&Slot> {
        self.slots.get((number as usize).checked_sub(1)?)
    }

    /// Number of occupied slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Occupied slots in slot order.
    pub fn active(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| !s.is_empty())
    }
}

/// Assign athletes to slots.
pub fn assign_slots(athletes: Vec<MatchedAthlete>) -> SlotAssignment {
    let mut slots: Vec<Slot> = (1..=SLOT_COUNT as u8).map(Slot::vacant).collect();
    // Natural claims per slot, as indices into `athletes`.
    let mut claims: Vec<Vec<usize>> = vec![Vec::new(); SLOT_COUNT];
    let mut queue: Vec<usize> = Vec::new();

    for (index, athlete) in athletes.iter().enumerate() {
        match jersey_to_slot(&athlete.roster.jersey) {
            Some(slot) => claims[slot as usize - 1].push(index),
            None => queue.push(index),
        }
    }

    let mut placed: Vec<Option<u8>> = vec![None; athletes.len()];
    for (slot_index, claimants) in claims.iter().enumerate() {
        let Some(&first) = claimants.first() else {
            continue;
        };
        let winner = claimants
            .iter()
            .copied()
            .find(|&i| athletes[i].has_stats())
            .unwrap_or(first);
        placed[winner] = Some(slot_index as u8 + 1);
        queue.extend(claimants.iter().copied().filter(|&i| i != winner));
    }
    queue.sort_unstable();

    let mut free = (1..=SLOT_COUNT as u8).filter(|n| !placed.contains(&Some(*n))).collect::<Vec<_>>().into_iter();
    let mut overflow = Vec::new();
    for index in queue {
        match free.next() {
            Some(slot) => placed[index] = Some(slot),
            None => overflow.push(index),
        }
    }

    let mut inactive = Vec::new();
    let mut athletes: Vec<Option<MatchedAthlete>> = athletes.into_iter().map(Some).collect();
    for (index, slot) in placed.iter().enumerate() {
        let Some(slot) = slot else {
            continue;
        };
        if let Some(athlete) = athletes[index].take() {
            let target = &mut slots[*slot as usize - 1];
            target.display_jersey = athlete.roster.jersey.trim().to_string();
            target.athlete = Some(athlete);
        }
    }
    for index in overflow {
        if let Some(athlete) = athletes[index].take() {
            log::warn!("no free slot for #{} {}", athlete.roster.jersey, athlete.roster.full_name());
            inactive.push(athlete);
        }
    }

    SlotAssignment { slots, inactive }
}

/// One row of the collapsed slot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotRow {
    /// An occupied slot
    Athlete {
        /// Slot number
        slot: u8,
    },
    /// A single empty slot kept as its own row
    Empty {
        /// Slot number
        slot: u8,
    },
    /// A run of at least [`MIN_GAP`] empty slots
    Gap {
        /// Number of empty slots
        count: usize,
        /// First empty slot of the run
        start_row: u8,
    },
}

/// Collapse runs of [`MIN_GAP`] or more empty slots into gap rows.
///
/// ```
/// use statsheet::slots::{collapse_gaps, SlotRow};
///
/// let mut occupied = [true; 20];
/// for i in 9..16 {
///     occupied[i] = false; // slots 10..=16
/// }
/// let rows = collapse_gaps(&occupied);
/// assert_eq!(rows[9], SlotRow::Gap { count: 7, start_row: 10 });
/// assert_eq!(rows.len(), 14);
/// ```
pub fn collapse_gaps(occupied: &[bool]) -> Vec<SlotRow> {
    let mut rows = Vec::new();
    let mut i = 0;
    while i < occupied.len() {
        let slot = (i + 1) as u8;
        if occupied[i] {
            rows.push(SlotRow::Athlete { slot });
            i += 1;
            continue;
        }
        let run = occupied[i..].iter().take_while(|o| !**o).count();
        if run >= MIN_GAP {
            rows.push(SlotRow::Gap {
                count: run,
                start_row: slot,
            });
        } else {
            rows.extend((0..run).map(|k| SlotRow::Empty { slot: slot + k as u8 }));
        }
        i += run;
    }
    rows
}

/// Collapsed rows for an assignment.
pub fn collapse_assignment(assignment: &SlotAssignment) -> Vec<SlotRow> {
    let occupied: Vec<bool> = assignment.slots.iter().map(|s| !s.is_empty()).collect();
    collapse_gaps(&occupied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RawStatRecord, RosterPlayer, SoccerStats, SportStats};

    fn athlete(jersey: &str, name: &str, with_stats: bool) -> MatchedAthlete {
        let roster = RosterPlayer::new(jersey, name, "X");
        let stats = with_stats.then(|| RawStatRecord::new(jersey, name, SportStats::Soccer(SoccerStats::default())));
        MatchedAthlete {
            roster,
            stats,
            match_kind: None,
        }
    }

    #[test]
    fn test_jersey_to_slot_rejects() {
        assert_eq!(jersey_to_slot("98"), Some(98));
        assert_eq!(jersey_to_slot("99"), None);
        assert_eq!(jersey_to_slot("07"), None);
        assert_eq!(jersey_to_slot("-1"), None);
        assert_eq!(jersey_to_slot("A1"), None);
        assert_eq!(jersey_to_slot(""), None);
    }

    #[test]
    fn test_duplicate_prefers_stats() {
        let assignment = assign_slots(vec![athlete("5", "NoStats", false), athlete("5", "Stats", true)]);
        assert_eq!(assignment.slot(5).unwrap().athlete.as_ref().unwrap().roster.first_name, "Stats");
        let moved = assignment.slot(1).unwrap();
        assert_eq!(moved.athlete.as_ref().unwrap().roster.first_name, "NoStats");
        assert_eq!(moved.display_jersey, "5");
    }

    #[test]
    fn test_invalid_jersey_takes_lowest_free() {
        let assignment = assign_slots(vec![athlete("1", "A", true), athlete("150", "B", true), athlete("2", "C", true)]);
        assert_eq!(assignment.slot(3).unwrap().athlete.as_ref().unwrap().roster.first_name, "B");
    }

    #[test]
    fn test_zero_and_double_zero() {
        let assignment = assign_slots(vec![athlete("0", "Zero", false), athlete("00", "DoubleZero", false)]);
        assert_eq!(assignment.slot(90).unwrap().display_jersey, "0");
        assert_eq!(assignment.slot(99).unwrap().display_jersey, "00");
    }

    #[test]
    fn test_overflow_becomes_inactive() {
        let mut athletes: Vec<MatchedAthlete> = (1..=98).map(|n| athlete(&n.to_string(), "P", true)).collect();
        athletes.push(athlete("0", "Z", true));
        athletes.push(athlete("00", "ZZ", true));
        athletes.push(athlete("12", "Dup", false));
        athletes.push(athlete("x", "Bad", false));
        let assignment = assign_slots(athletes);
        assert_eq!(assignment.active_count(), 99);
        // "0" lost slot 90 to jersey 90 and found nothing free.
        let names: Vec<&str> = assignment.inactive.iter().map(|a| a.roster.first_name.as_str()).collect();
        assert_eq!(names, vec!["Z", "Dup", "Bad"]);
    }

    #[test]
    fn test_short_runs_stay_individual() {
        let mut occupied = [true; 10];
        occupied[3] = false;
        occupied[4] = false;
        occupied[5] = false;
        let rows = collapse_gaps(&occupied);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[3], SlotRow::Empty { slot: 4 });
        assert_eq!(rows[5], SlotRow::Empty { slot: 6 });
    }

    #[test]
    fn test_trailing_gap() {
        let rows = collapse_gaps(&[true, false, false, false, false]);
        assert_eq!(rows, vec![SlotRow::Athlete { slot: 1 }, SlotRow::Gap { count: 4, start_row: 2 }]);
    }
}
