//! Integration tests for fused digit recovery.

use proptest::prelude::*;
use statsheet::splitter::{split_batting, split_pitching, split_rbi_tb, split_sb_att, DigitSearch};

#[test]
fn test_known_batting_lines() {
    let cases = [
        ("1510412", 40, (15, 10, 4, 1, 2)),
        ("32100", 20, (3, 2, 1, 0, 0)),
        ("00000", 0, (0, 0, 0, 0, 0)),
    ];
    for (token, ab, expected) in cases {
        let s = split_batting(token, ab).unwrap_or_else(|| panic!("no split for {}", token));
        assert_eq!((s.r, s.h, s.doubles, s.triples, s.hr), expected, "token {}", token);
    }
}

#[test]
fn test_rejection_leaves_nothing() {
    assert_eq!(split_batting("12111", 30), None);
    assert_eq!(split_batting("1a111", 30), None);
    assert_eq!(split_pitching("12503215"), None);
    assert_eq!(split_sb_att("7"), None);
}

#[test]
fn test_rbi_with_fused_slugging() {
    let split = split_rbi_tb("341.000", 4).unwrap();
    assert_eq!(split.rbi, 3);
    assert_eq!(split.slg, Some(1.0));
    assert_eq!(split_rbi_tb("520", 20).map(|s| s.rbi), Some(5));
    assert_eq!(split_rbi_tb("520", 21), None);
}

#[test]
fn test_pitching_prefers_earned_runs() {
    // 6|5|4|4|10 leaves one unearned run; 65|4|4|1|0 leaves none.
    let split = split_pitching("2.1654410").unwrap();
    assert_eq!(split.ip.to_string(), "2.1");
    assert_eq!((split.h, split.r, split.er, split.bb, split.so), (65, 4, 4, 1, 0));
}

#[test]
fn test_candidate_cap() {
    let search = DigitSearch::uniform(12, 1..=3);
    let digits = "123456789012345678901234";
    assert!(search.candidates(digits).len() <= statsheet::splitter::MAX_CANDIDATES);
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 65536, ..ProptestConfig::default() })]

    #[test]
    fn batting_single_digit_round_trip(
        r in 0u32..10,
        h in 0u32..10,
        d in 0u32..10,
        t in 0u32..10,
        hr in 0u32..10,
        extra_ab in 0u32..30,
    ) {
        prop_assume!(d + t + hr <= h);
        let ab = h + extra_ab;
        let token = format!("{}{}{}{}{}", r, h, d, t, hr);
        let split = split_batting(&token, ab);
        prop_assert!(split.is_some());
        let s = split.unwrap();
        prop_assert_eq!((s.r, s.h, s.doubles, s.triples, s.hr), (r, h, d, t, hr));
        prop_assert_eq!(s.xbh, None);
    }

    #[test]
    fn pitching_single_digit_round_trip(
        full in 0u32..200,
        partial in 0u8..3,
        h in 0u32..10,
        r in 0u32..10,
        er_gap in 0u32..10,
        bb in 0u32..10,
        so in 0u32..10,
    ) {
        let er = r.saturating_sub(er_gap);
        let token = format!("{}.{}{}{}{}{}{}", full, partial, h, r, er, bb, so);
        let s = split_pitching(&token);
        prop_assert!(s.is_some());
        let s = s.unwrap();
        prop_assert_eq!(s.ip.full, full);
        prop_assert_eq!(s.ip.partial, partial);
        prop_assert_eq!((s.h, s.r, s.er, s.bb, s.so), (h, r, er, bb, so));
    }

    #[test]
    fn batting_split_always_satisfies_constraints(token in "[0-9]{5,12}", ab in 0u32..120) {
        if let Some(s) = split_batting(&token, ab) {
            prop_assert!(ab == 0 || s.h <= ab);
            prop_assert!(s.doubles + s.triples + s.hr <= s.h);
            if let Some(xbh) = s.xbh {
                prop_assert_eq!(xbh, s.doubles + s.triples + s.hr);
            }
        }
    }

    #[test]
    fn sb_att_never_has_more_steals_than_attempts(sb in 0u32..50, extra in 0u32..50) {
        let att = sb + extra;
        let printed = format!("{}-{}", sb, att);
        prop_assert_eq!(split_sb_att(&printed), Some((sb, att)));
        let fused = format!("{}{}", sb, att);
        if let Some((s, a)) = split_sb_att(&fused) {
            prop_assert!(a >= s);
        }
    }
}
