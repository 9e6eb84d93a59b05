//! Constraint-guided splitting of fused digit runs.
//!
//! Some text layers concatenate adjacent numeric columns into one token.
//! [`DigitSearch`] recovers the values by enumerating every partition of the
//! digit string into groups of bounded width, discarding partitions that
//! fail a predicate and ranking the survivors with a scoring key.
//!
//! # Example
//!
//! ```
//! use statsheet::splitter::DigitSearch;
//!
//! // Two values where the second is at least the first.
//! let search = DigitSearch::uniform(2, 1..=2).require(|v| v[1] >= v[0]);
//! let best = search.best_by("312", |v| v[0]);
//! assert_eq!(best, Some(vec![3, 12]));
//! ```

pub mod baseball;

use std::ops::RangeInclusive;

pub use baseball::{
    split_batting, split_pitching, split_rbi_tb, split_sb_att, BattingSplit, PitchingSplit,
    RbiSplit,
};

/// Hard cap on enumerated partitions for a single token.
pub const MAX_CANDIDATES: usize = 4096;

type Predicate<'a> = Box<dyn Fn(&[u32]) -> bool + 'a>;

/// Bounded partition search over a digit string.
pub struct DigitSearch<'a> {
    widths: Vec<RangeInclusive<usize>>,
    predicates: Vec<Predicate<'a>>,
}

impl<'a> DigitSearch<'a> {
    /// Search with an explicit digit-width range per position.
    pub fn new(widths: Vec<RangeInclusive<usize>>) -> Self {
        Self {
            widths,
            predicates: Vec::new(),
        }
    }

    /// Search where every position shares the same width range.
    pub fn uniform(arity: usize, width: RangeInclusive<usize>) -> Self {
        Self::new(vec![width; arity])
    }

    /// Number of groups.
    pub fn arity(&self) -> usize {
        self.widths.len()
    }

    /// Add a predicate every accepted partition must satisfy.
    pub fn require(mut self, predicate: impl Fn(&[u32]) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// All partitions of `digits` that satisfy every predicate, in
    /// enumeration order (narrower groups first, left to right).
    ///
    /// Multi-digit groups may not start with `0`. Non-digit input yields no
    /// candidates.
    pub fn candidates(&self, digits: &str) -> Vec<Vec<u32>> {
        let mut out = Vec::new();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return out;
        }
        let min_len: usize = self.widths.iter().map(|w| *w.start()).sum();
        let max_len: usize = self.widths.iter().map(|w| *w.end()).sum();
        if digits.len() < min_len || digits.len() > max_len {
            return out;
        }

        let mut current = Vec::with_capacity(self.arity());
        self.enumerate(digits.as_bytes(), 0, &mut current, &mut out);
        out
    }

    fn enumerate(&self, digits: &[u8], pos: usize, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
        if out.len() >= MAX_CANDIDATES {
            return;
        }
        let index = current.len();
        if index == self.widths.len() {
            if pos == digits.len() && self.predicates.iter().all(|p| p(current)) {
                out.push(current.clone());
            }
            return;
        }

        // Bytes the remaining positions must and may consume.
        let rest = &self.widths[index + 1..];
        let rest_min: usize = rest.iter().map(|w| *w.start()).sum();
        let rest_max: usize = rest.iter().map(|w| *w.end()).sum();
        let remaining = digits.len() - pos;

        for width in self.widths[index].clone() {
            if width == 0 || width > remaining {
                continue;
            }
            let left = remaining - width;
            if left < rest_min || left > rest_max {
                continue;
            }
            let group = &digits[pos..pos + width];
            if width > 1 && group[0] == b'0' {
                continue;
            }
            let value = group
                .iter()
                .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as u32));
            current.push(value);
            self.enumerate(digits, pos + width, current, out);
            current.pop();
        }
    }

    /// The surviving partition with the greatest key. Ties keep the first in
    /// enumeration order.
    pub fn best_by<K: Ord>(&self, digits: &str, key: impl Fn(&[u32]) -> K) -> Option<Vec<u32>> {
        let mut best: Option<(K, Vec<u32>)> = None;
        for candidate in self.candidates(digits) {
            let k = key(&candidate);
            match &best {
                Some((best_key, _)) if k <= *best_key => {},
                _ => best = Some((k, candidate)),
            }
        }
        best.map(|(_, v)| v)
    }
}

impl std::fmt::Debug for DigitSearch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitSearch")
            .field("widths", &self.widths)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
