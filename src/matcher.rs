//! Roster ↔ stat record reconciliation.
//!
//! Matching runs in two passes over the whole roster:
//!
//! 1. **Jersey**: same normalized jersey and a loose name match (first or
//!    last name, case and punctuation ignored, substrings tolerated for
//!    nicknames and initials).
//! 2. **Name only**: a different jersey but first and last name both equal
//!    after normalization, for players whose number changed between the
//!    roster and the stat sheet.
//!
//! Every record is consumed by at most one roster entry. Records that match
//! nobody are dropped; roster entries that match nothing keep `stats: None`.

use crate::records::{RawStatRecord, RosterPlayer};
use serde::Serialize;

/// Shortest word allowed to match by substring.
const MIN_SUBSTRING_LEN: usize = 3;

/// Which pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Same jersey, loose name match
    Jersey,
    /// Different jersey, exact first and last name
    NameOnly,
}

/// A roster entry and the stats matched to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedAthlete {
    /// Roster data
    pub roster: RosterPlayer,
    /// Matched stats
    pub stats: Option<RawStatRecord>,
    /// Pass that produced the match
    pub match_kind: Option<MatchKind>,
}

impl MatchedAthlete {
    /// Unmatched roster entry.
    pub fn unmatched(roster: RosterPlayer) -> Self {
        Self {
            roster,
            stats: None,
            match_kind: None,
        }
    }

    /// True when stats were found.
    pub fn has_stats(&self) -> bool {
        self.stats.is_some()
    }
}

/// Normalize a jersey: trim, drop `#` and leading zeros. `"0"` and `"00"`
/// stay distinct.
///
/// ```
/// use statsheet::matcher::normalize_jersey;
///
/// assert_eq!(normalize_jersey("#07"), "7");
/// assert_eq!(normalize_jersey("00"), "00");
/// assert_eq!(normalize_jersey("0"), "0");
/// ```
pub fn normalize_jersey(jersey: &str) -> String {
    let j = jersey.trim().trim_start_matches('#').trim();
    if j.is_empty() {
        return String::new();
    }
    if j.chars().all(|c| c == '0') {
        return if j.len() == 1 { "0".to_string() } else { "00".to_string() };
    }
    if j.chars().all(|c| c.is_ascii_digit()) {
        j.trim_start_matches('0').to_string()
    } else {
        j.to_string()
    }
}

/// Lowercase, keep letters, digits and spaces, collapse whitespace.
pub fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '.' || c == ',' { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a printed name into `(first, last)`. `"Smith, Mike"` and
/// `"Mike Smith"` both give `("Mike", "Smith")`.
pub fn split_name(name: &str) -> (String, String) {
    let name = name.trim();
    if let Some((last, first)) = name.split_once(',') {
        return (first.trim().to_string(), last.trim().to_string());
    }
    match name.rsplit_once(char::is_whitespace) {
        Some((first, last)) => (first.trim().to_string(), last.trim().to_string()),
        None => (String::new(), name.to_string()),
    }
}

fn words_match(word: &str, target: &str) -> bool {
    if word == target {
        return true;
    }
    word.len() >= MIN_SUBSTRING_LEN
        && target.len() >= MIN_SUBSTRING_LEN
        && (target.contains(word) || word.contains(target))
}

/// First or last roster name appears in the printed name.
pub fn loose_name_match(roster: &RosterPlayer, printed: &str) -> bool {
    let printed = normalize_name(printed);
    let targets = [normalize_name(&roster.first_name), normalize_name(&roster.last_name)];
    targets.iter().filter(|t| !t.is_empty()).any(|target| {
        if target.contains(' ') {
            return printed.contains(target.as_str());
        }
        printed.split_whitespace().any(|word| words_match(word, target))
    })
}

/// First and last name both equal after normalization.
pub fn exact_name_match(roster: &RosterPlayer, printed: &str) -> bool {
    let (first, last) = split_name(printed);
    let first = normalize_name(&first);
    let last = normalize_name(&last);
    !first.is_empty()
        && !last.is_empty()
        && first == normalize_name(&roster.first_name)
        && last == normalize_name(&roster.last_name)
}

/// Match every roster entry against the parsed records.
///
/// The output has one entry per roster player, in roster order.
pub fn match_players(roster: &[RosterPlayer], records: Vec<RawStatRecord>) -> Vec<MatchedAthlete> {
    let mut pool: Vec<Option<RawStatRecord>> = records.into_iter().map(Some).collect();
    let mut matched: Vec<MatchedAthlete> = roster.iter().cloned().map(MatchedAthlete::unmatched).collect();

    for athlete in matched.iter_mut() {
        let jersey = normalize_jersey(&athlete.roster.jersey);
        if jersey.is_empty() {
            continue;
        }
        let found = pool.iter().position(|slot| {
            slot.as_ref().map_or(false, |r| {
                normalize_jersey(&r.jersey) == jersey && loose_name_match(&athlete.roster, &r.name)
            })
        });
        if let Some(index) = found {
            athlete.stats = pool[index].take();
            athlete.match_kind = Some(MatchKind::Jersey);
        }
    }

    for athlete in matched.iter_mut().filter(|a| a.stats.is_none()) {
        let jersey = normalize_jersey(&athlete.roster.jersey);
        let found = pool.iter().position(|slot| {
            slot.as_ref().map_or(false, |r| {
                normalize_jersey(&r.jersey) != jersey && exact_name_match(&athlete.roster, &r.name)
            })
        });
        if let Some(index) = found {
            log::debug!(
                "{} matched by name (roster #{}, sheet #{})",
                athlete.roster.full_name(),
                athlete.roster.jersey,
                pool[index].as_ref().map_or("", |r| r.jersey.as_str())
            );
            athlete.stats = pool[index].take();
            athlete.match_kind = Some(MatchKind::NameOnly);
        }
    }

    let leftover = pool.iter().flatten().count();
    if leftover > 0 {
        log::info!("{} stat records matched no roster entry", leftover);
    }
    matched
}
