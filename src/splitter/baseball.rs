//! Baseball/softball fused-column recovery.

use super::DigitSearch;
use crate::records::Innings;
use std::cmp::Reverse;

/// Runs, hits and extra-base hits recovered from one fused token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattingSplit {
    /// Runs
    pub r: u32,
    /// Hits
    pub h: u32,
    /// Doubles
    pub doubles: u32,
    /// Triples
    pub triples: u32,
    /// Home runs
    pub hr: u32,
    /// Extra-base hit total when the sixth group was present
    pub xbh: Option<u32>,
}

impl BattingSplit {
    /// `H + 2B + 2·3B + 3·HR`.
    pub fn total_bases(&self) -> u32 {
        self.h + self.doubles + 2 * self.triples + 3 * self.hr
    }
}

fn batting_search<'a>(arity: usize, ab: u32) -> DigitSearch<'a> {
    DigitSearch::uniform(arity, 1..=2)
        // Pinch runners have zero at-bats, so the hits bound is dropped.
        .require(move |v| ab == 0 || v[1] <= ab)
        .require(|v| v[2] <= v[1] && v[3] <= v[1] && v[4] <= v[1])
        .require(|v| v[2] + v[3] + v[4] <= v[1])
}

/// Split a fused `R H 2B 3B HR [XBH]` token.
///
/// The six-group reading, where the last group must equal `2B+3B+HR`, is
/// preferred over the five-group one. Among survivors the largest hit count
/// wins. Returns `None` when no partition satisfies the constraints.
///
/// ```
/// use statsheet::splitter::split_batting;
///
/// let split = split_batting("1510412", 40).unwrap();
/// assert_eq!((split.r, split.h, split.doubles, split.triples, split.hr), (15, 10, 4, 1, 2));
/// ```
pub fn split_batting(token: &str, ab: u32) -> Option<BattingSplit> {
    let six = batting_search(6, ab).require(|v| v[5] == v[2] + v[3] + v[4]);
    if let Some(v) = six.best_by(token, |v| v[1]) {
        return Some(BattingSplit {
            r: v[0],
            h: v[1],
            doubles: v[2],
            triples: v[3],
            hr: v[4],
            xbh: Some(v[5]),
        });
    }
    batting_search(5, ab).best_by(token, |v| v[1]).map(|v| BattingSplit {
        r: v[0],
        h: v[1],
        doubles: v[2],
        triples: v[3],
        hr: v[4],
        xbh: None,
    })
}

/// RBI recovered from a fused `RBI TB [SLG]` token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RbiSplit {
    /// Runs batted in
    pub rbi: u32,
    /// Total bases (as supplied by the caller)
    pub tb: u32,
    /// Slugging percentage when it was fused onto the token
    pub slg: Option<f64>,
}

/// Strip a known total-bases suffix (and an optional trailing slugging
/// percentage) from a fused token, leaving the RBI count.
///
/// ```
/// use statsheet::splitter::split_rbi_tb;
///
/// let split = split_rbi_tb("1224.545", 24).unwrap();
/// assert_eq!(split.rbi, 12);
/// assert_eq!(split.slg, Some(0.545));
/// ```
pub fn split_rbi_tb(token: &str, tb: u32) -> Option<RbiSplit> {
    // Offsets below are byte offsets.
    if !token.is_ascii() {
        return None;
    }
    let tb_text = tb.to_string();
    let strip = |head: &str| -> Option<u32> {
        let rbi = head.strip_suffix(tb_text.as_str())?;
        if rbi.is_empty() || rbi.len() > 3 || !rbi.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if rbi.len() > 1 && rbi.starts_with('0') {
            return None;
        }
        rbi.parse().ok()
    };

    let Some(dot) = token.find('.') else {
        return strip(token).map(|rbi| RbiSplit { rbi, tb, slg: None });
    };

    let head = &token[..dot];
    let fraction = &token[dot..];
    if fraction.len() < 2 || !fraction[1..].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // ".545" first, then "1.000" with the leading digit taken from the head.
    if let Some(rbi) = strip(head) {
        let slg: Option<f64> = fraction.parse().ok();
        // Zero total bases means zero slugging and the reverse.
        if slg.map_or(false, |s| (s > 0.0) == (tb > 0)) {
            return Some(RbiSplit { rbi, tb, slg });
        }
    }
    let split_at = head.len().checked_sub(1)?;
    let (rest, whole) = head.split_at(split_at);
    let slg: f64 = format!("{}{}", whole, fraction).parse().ok()?;
    if slg > 4.0 {
        return None;
    }
    strip(rest).map(|rbi| RbiSplit {
        rbi,
        tb,
        slg: Some(slg),
    })
}

/// Split a stolen-base/attempt pair. Accepts `"2-3"` as printed or the fused
/// `"23"`, where attempts has the same number of digits as steals or one
/// more, and attempts is at least steals.
///
/// ```
/// use statsheet::splitter::split_sb_att;
///
/// assert_eq!(split_sb_att("1012"), Some((10, 12)));
/// assert_eq!(split_sb_att("910"), Some((9, 10)));
/// assert_eq!(split_sb_att("32"), None);
/// ```
pub fn split_sb_att(token: &str) -> Option<(u32, u32)> {
    if let Some((sb, att)) = token.split_once('-') {
        let sb: u32 = sb.trim().parse().ok()?;
        let att: u32 = att.trim().parse().ok()?;
        return (att >= sb).then_some((sb, att));
    }
    let n = token.len();
    if n < 2 {
        return None;
    }
    let sb_width = n / 2;
    let att_width = n - sb_width;
    DigitSearch::new(vec![sb_width..=sb_width, att_width..=att_width])
        .require(|v| v[1] >= v[0])
        .best_by(token, |_| ())
        .map(|v| (v[0], v[1]))
}

/// Pitching values recovered from a fused `IP H R ER BB SO` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchingSplit {
    /// Innings pitched
    pub ip: Innings,
    /// Hits allowed
    pub h: u32,
    /// Runs allowed
    pub r: u32,
    /// Earned runs
    pub er: u32,
    /// Walks
    pub bb: u32,
    /// Strikeouts
    pub so: u32,
}

/// Split a fused pitching token keyed on the decimal point of innings
/// pitched.
///
/// The single digit after the point is the partial inning. The remainder is
/// partitioned into H, R, ER, BB and SO with `ER ≤ R`; ties prefer the
/// smallest `R − ER`.
///
/// ```
/// use statsheet::splitter::split_pitching;
///
/// let split = split_pitching("12.1503215").unwrap();
/// assert_eq!(split.ip.to_string(), "12.1");
/// assert_eq!((split.h, split.r, split.er, split.bb, split.so), (50, 3, 2, 1, 5));
/// ```
pub fn split_pitching(token: &str) -> Option<PitchingSplit> {
    let dot = token.find('.')?;
    let head = &token[..dot];
    if head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let rest = token.get(dot + 1..)?;
    let partial = rest.get(..1)?;
    let ip = Innings::parse(&format!("{}.{}", head, partial))?;
    let remainder = &rest[1..];

    let search = DigitSearch::new(vec![1..=3, 1..=2, 1..=2, 1..=2, 1..=3]).require(|v| v[2] <= v[1]);
    search
        .best_by(remainder, |v| Reverse(v[1] - v[2]))
        .map(|v| PitchingSplit {
            ip,
            h: v[0],
            r: v[1],
            er: v[2],
            bb: v[3],
            so: v[4],
        })
}
