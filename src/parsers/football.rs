//! Football season stat sheets.
//!
//! A football sheet is a sequence of section tables (rushing, passing,
//! receiving, ...). The parser walks the lines with an explicit section
//! state. A header line moves the state with [`transition`]; every other
//! line is read with the current section's layout and upserted into an
//! [`AthleteTable`], so a player listed under rushing and receiving ends up
//! as one record.
//!
//! Text layers sometimes glue a section header onto the last data line of
//! the previous section. The data part of such a line is read first, in the
//! old section, before the state changes.

use super::values::{self, count, decimal, pair, percent, triple, yards};
use super::{AthleteTable, ParseReport};
use crate::error::ParseWarning;
use crate::layout::Row;
use crate::records::{
    DefenseLine, FieldGoalLine, FootballStats, PassingLine, PuntingLine, RawStatRecord,
    ReceivingLine, ReturnLine, RushingLine, ScoringLine, SportStats,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A section title followed by one of its column words.
    static ref HEADER: Regex = Regex::new(
        r"(?i)\b(rushing|passing|receiving|punt\s+returns|kick(?:off)?\s+returns|scoring|field\s+goals|punting|defen[cs]e|all[\s-]+purpose|interceptions|kickoffs)\s+(gp|g|att|no|effic|cmp|td|fgm|fg|solo|tot|yds|ret|rush)\b"
    )
    .unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Sections whose lines are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// gp att gain loss net avg td long avg/g
    Rushing,
    /// gp effic cmp-att-int pct yds td lng avg/g
    Passing,
    /// gp no yds avg td long avg/g
    Receiving,
    /// no yds avg td long
    PuntReturns,
    /// no yds avg td long
    KickReturns,
    /// td fg kick rush rcv pass dxp saf pts
    Scoring,
    /// fgm-fga pct ... long
    FieldGoals,
    /// no yds avg long
    Punting,
    /// gp solo ast total tfl-yds sacks-yds int-yds brup qbh ff fr
    Defense,
}

impl Section {
    fn label(&self) -> &'static str {
        match self {
            Section::Rushing => "rushing",
            Section::Passing => "passing",
            Section::Receiving => "receiving",
            Section::PuntReturns => "punt returns",
            Section::KickReturns => "kick returns",
            Section::Scoring => "scoring",
            Section::FieldGoals => "field goals",
            Section::Punting => "punting",
            Section::Defense => "defense",
        }
    }
}

/// State after reading a section title. Titles of tables that are not read
/// (all-purpose, interceptions, kickoffs) leave no current section.
pub fn transition(title: &str) -> Option<Section> {
    let normalized = WHITESPACE.replace_all(&title.trim().to_ascii_lowercase(), " ").into_owned();
    match normalized.as_str() {
        "rushing" => Some(Section::Rushing),
        "passing" => Some(Section::Passing),
        "receiving" => Some(Section::Receiving),
        "punt returns" => Some(Section::PuntReturns),
        "kick returns" | "kickoff returns" => Some(Section::KickReturns),
        "scoring" => Some(Section::Scoring),
        "field goals" => Some(Section::FieldGoals),
        "punting" => Some(Section::Punting),
        "defense" | "defence" => Some(Section::Defense),
        _ => None,
    }
}

/// Split a header off a line: `(data before the header, section title)`.
fn find_header(line: &str) -> Option<(&str, &str)> {
    let caps = HEADER.captures(line)?;
    let whole = caps.get(0)?;
    let title = caps.get(1)?;
    Some((line[..whole.start()].trim(), title.as_str()))
}

/// Optional jersey, a name, then the stat tokens.
fn athlete_line(line: &str) -> Option<(String, String, Vec<&str>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (jersey, rest) = match tokens.split_first() {
        Some((first, rest)) => match values::jersey(first) {
            Some(j) => (j, rest),
            None => (String::new(), &tokens[..]),
        },
        None => return None,
    };
    let name_len = rest.iter().position(|t| values::is_numeric(t)).unwrap_or(rest.len());
    let name = rest[..name_len].join(" ");
    if !name.chars().any(char::is_alphabetic) {
        return None;
    }
    Some((jersey, name, rest[name_len..].to_vec()))
}

fn cell<'a>(stats: &[&'a str], i: usize) -> &'a str {
    stats.get(i).copied().unwrap_or("")
}

/// `5.5-20` style pair of a decimal count and yards.
fn count_yards(text: &str) -> (Option<f64>, Option<i32>) {
    match text.split_once('-') {
        Some((n, y)) => (decimal(n), yards(y)),
        None => (decimal(text), None),
    }
}

fn rushing(s: &[&str]) -> Option<RushingLine> {
    (s.len() >= 5).then(|| RushingLine {
        gp: count(cell(s, 0)),
        att: count(cell(s, 1)),
        gain: yards(cell(s, 2)),
        loss: yards(cell(s, 3)),
        net: yards(cell(s, 4)),
        avg: decimal(cell(s, 5)),
        td: count(cell(s, 6)),
        long: yards(cell(s, 7)),
        avg_per_game: decimal(cell(s, 8)),
    })
}

fn passing(s: &[&str]) -> Option<PassingLine> {
    if s.len() < 3 {
        return None;
    }
    let (cmp, att, int) = triple(cell(s, 2));
    Some(PassingLine {
        gp: count(cell(s, 0)),
        efficiency: decimal(cell(s, 1)),
        cmp,
        att,
        int,
        pct: percent(cell(s, 3)),
        yds: yards(cell(s, 4)),
        td: count(cell(s, 5)),
        long: yards(cell(s, 6)),
        avg_per_game: decimal(cell(s, 7)),
    })
}

fn receiving(s: &[&str]) -> Option<ReceivingLine> {
    (s.len() >= 3).then(|| ReceivingLine {
        gp: count(cell(s, 0)),
        no: count(cell(s, 1)),
        yds: yards(cell(s, 2)),
        avg: decimal(cell(s, 3)),
        td: count(cell(s, 4)),
        long: yards(cell(s, 5)),
        avg_per_game: decimal(cell(s, 6)),
    })
}

fn returns(s: &[&str]) -> Option<ReturnLine> {
    (s.len() >= 2).then(|| ReturnLine {
        no: count(cell(s, 0)),
        yds: yards(cell(s, 1)),
        avg: decimal(cell(s, 2)),
        td: count(cell(s, 3)),
        long: yards(cell(s, 4)),
    })
}

fn scoring(s: &[&str]) -> Option<ScoringLine> {
    if s.len() < 2 {
        return None;
    }
    let pts = count(s[s.len() - 1]);
    if s.len() < 9 {
        return Some(ScoringLine {
            td: count(cell(s, 0)),
            pts,
            ..Default::default()
        });
    }
    let (kick_made, kick_att) = pair(cell(s, 2));
    Some(ScoringLine {
        td: count(cell(s, 0)),
        fg: count(cell(s, 1)),
        kick_made,
        kick_att,
        rush: count(cell(s, 3)),
        rcv: count(cell(s, 4)),
        pass: count(cell(s, 5)),
        dxp: count(cell(s, 6)),
        saf: count(cell(s, 7)),
        pts,
    })
}

fn field_goals(s: &[&str]) -> Option<FieldGoalLine> {
    if s.len() < 2 {
        return None;
    }
    let (made, att) = pair(cell(s, 0));
    made?;
    Some(FieldGoalLine {
        made,
        att,
        pct: percent(cell(s, 1)),
        long: if s.len() >= 3 { yards(s[s.len() - 1]) } else { None },
    })
}

fn punting(s: &[&str]) -> Option<PuntingLine> {
    (s.len() >= 2).then(|| PuntingLine {
        no: count(cell(s, 0)),
        yds: yards(cell(s, 1)),
        avg: decimal(cell(s, 2)),
        long: yards(cell(s, 3)),
    })
}

fn defense(s: &[&str]) -> Option<DefenseLine> {
    if s.len() < 4 {
        return None;
    }
    let (tfl, tfl_yds) = count_yards(cell(s, 4));
    let (sacks, sack_yds) = count_yards(cell(s, 5));
    let (int, int_yds) = count_yards(cell(s, 6));
    Some(DefenseLine {
        gp: count(cell(s, 0)),
        solo: count(cell(s, 1)),
        ast: count(cell(s, 2)),
        total: decimal(cell(s, 3)),
        tfl,
        tfl_yds,
        sacks,
        sack_yds,
        int: int.map(|n| n as u32),
        int_yds,
        brup: count(cell(s, 7)),
        qbh: count(cell(s, 8)),
        ff: count(cell(s, 9)),
        fr: count(cell(s, 10)),
    })
}

/// Read one data line in `section` into the table. Returns false when the
/// line named an athlete but its stats could not be read.
fn read_line(section: Section, line: &str, table: &mut AthleteTable<FootballStats>) -> bool {
    let Some((jersey, name, stats)) = athlete_line(line) else {
        return true;
    };
    if stats.is_empty() {
        return true;
    }
    macro_rules! store {
        ($field:ident, $reader:expr) => {
            match $reader(&stats) {
                Some(parsed) => {
                    table.upsert(&jersey, &name).$field = Some(parsed);
                    true
                },
                None => false,
            }
        };
    }
    match section {
        Section::Rushing => store!(rushing, rushing),
        Section::Passing => store!(passing, passing),
        Section::Receiving => store!(receiving, receiving),
        Section::PuntReturns => store!(punt_returns, returns),
        Section::KickReturns => store!(kick_returns, returns),
        Section::Scoring => store!(scoring, scoring),
        Section::FieldGoals => store!(field_goals, field_goals),
        Section::Punting => store!(punting, punting),
        Section::Defense => store!(defense, defense),
    }
}

fn read_data(section: Option<Section>, line: &str, table: &mut AthleteTable<FootballStats>, report: &mut ParseReport<RawStatRecord>) {
    let Some(section) = section else {
        return;
    };
    if line.is_empty() || values::is_summary(line) {
        return;
    }
    if !read_line(section, line, table) {
        report.warn(ParseWarning::SkippedRow {
            section: section.label().to_string(),
            text: line.to_string(),
        });
    }
}

/// Parse the text lines of a football sheet.
pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> ParseReport<RawStatRecord> {
    let mut table = AthleteTable::<FootballStats>::new();
    let mut report = ParseReport::new();
    let mut section: Option<Section> = None;

    for line in lines {
        let line = line.trim();
        match find_header(line) {
            Some((data, title)) => {
                // Data glued in front of the header belongs to the old section.
                read_data(section, data, &mut table, &mut report);
                let next = transition(title);
                log::debug!("football section {:?} -> {:?}", section, next);
                section = next;
            },
            None => read_data(section, line, &mut table, &mut report),
        }
    }

    report.records = table
        .into_entries()
        .into_iter()
        .filter(|(_, _, stats)| !stats.is_empty())
        .map(|(jersey, name, stats)| RawStatRecord::new(jersey, name, SportStats::Football(stats)))
        .collect();
    report
}

/// Parse extracted rows of a football sheet.
pub fn parse(rows: &[Row]) -> ParseReport<RawStatRecord> {
    let lines: Vec<String> = rows.iter().map(Row::text).collect();
    parse_lines(lines.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn football(record: &RawStatRecord) -> &FootballStats {
        match &record.stats {
            SportStats::Football(f) => f,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_transition() {
        assert_eq!(transition("Rushing"), Some(Section::Rushing));
        assert_eq!(transition("Punt  Returns"), Some(Section::PuntReturns));
        assert_eq!(transition("Kickoff returns"), Some(Section::KickReturns));
        assert_eq!(transition("Interceptions"), None);
        assert_eq!(transition("All purpose"), None);
    }

    #[test]
    fn test_header_requires_column_word() {
        assert!(find_header("Rushing gp att gain").is_some());
        assert!(find_header("Team rushing offense improved").is_none());
        let (data, title) = find_header("5 Doe, Jim 3 4 40 38 Passing gp effic").unwrap();
        assert_eq!(data, "5 Doe, Jim 3 4 40 38");
        assert_eq!(title, "Passing");
    }

    #[test]
    fn test_athlete_line() {
        let (jersey, name, stats) = athlete_line("23 Smith, Mike 10 150").unwrap();
        assert_eq!((jersey.as_str(), name.as_str()), ("23", "Smith, Mike"));
        assert_eq!(stats, vec!["10", "150"]);

        let (jersey, name, _) = athlete_line("Smith, Mike 10 150").unwrap();
        assert_eq!((jersey.as_str(), name.as_str()), ("", "Smith, Mike"));
        assert!(athlete_line("23 45 67").is_none());
    }

    #[test]
    fn test_sections_accumulate_per_athlete() {
        let lines = [
            "Rushing gp att gain loss net avg td long avg/g",
            "23 Smith, Mike 10 150 820 40 780 5.2 8 65 78.0",
            "4 Diaz, Tom 10 30 120 10 110 3.7 1 22 11.0",
            "Total 10 180 940 50 890 4.9 9 65 89.0",
            "Receiving gp no yds avg td long avg/g",
            "23 Smith, Mike 10 12 140 11.7 1 35 14.0",
            "Interceptions no yds avg td long",
            "23 Smith, Mike 1 20 20.0 0 20",
        ];
        let report = parse_lines(lines);
        assert_eq!(report.records.len(), 2);
        let smith = football(&report.records[0]);
        let rushing = smith.rushing.as_ref().unwrap();
        assert_eq!(rushing.att, Some(150));
        assert_eq!(rushing.net, Some(780));
        assert_eq!(smith.receiving.as_ref().unwrap().no, Some(12));
        assert!(smith.defense.is_none());
        assert!(football(&report.records[1]).receiving.is_none());
    }

    #[test]
    fn test_mid_line_header_reads_data_first() {
        let lines = [
            "Rushing gp att gain loss net avg td long avg/g",
            "7 Ortiz, Sam 11 40 200 30 170 4.3 2 25 15.5 Passing gp effic cmp-att-int pct yds td lng avg/g",
            "7 Ortiz, Sam 11 140.2 150-240-6 62.5 1800 14 70 163.6",
        ];
        let report = parse_lines(lines);
        assert_eq!(report.records.len(), 1);
        let stats = football(&report.records[0]);
        assert_eq!(stats.rushing.as_ref().unwrap().att, Some(40));
        let passing = stats.passing.as_ref().unwrap();
        assert_eq!((passing.cmp, passing.att, passing.int), (Some(150), Some(240), Some(6)));
        assert_eq!(passing.pct, Some(62.5));
        assert_eq!(passing.yds, Some(1800));
    }

    #[test]
    fn test_kicking_and_defense_lines() {
        let lines = [
            "Field goals fgm-fga pct 01-19 20-29 30-39 40-49 50-99 lg",
            "39 Berg, Ola 12-15 80.0 0-0 4-4 5-6 3-5 0-0 47",
            "Defense gp solo ast total tfl-yds sacks-yds int-yds brup qbh ff fr",
            "44 Hale, Ty 12 40 35 75 9.5-40 4.5-30 1-15 3 6 2 1",
        ];
        let report = parse_lines(lines);
        let berg = football(&report.records[0]);
        let fg = berg.field_goals.as_ref().unwrap();
        assert_eq!((fg.made, fg.att, fg.long), (Some(12), Some(15), Some(47)));
        assert_eq!(fg.pct, Some(80.0));

        let hale = football(&report.records[1]).defense.clone().unwrap();
        assert_eq!(hale.total, Some(75.0));
        assert_eq!((hale.tfl, hale.tfl_yds), (Some(9.5), Some(40)));
        assert_eq!((hale.sacks, hale.int, hale.int_yds), (Some(4.5), Some(1), Some(15)));
        assert_eq!(hale.fr, Some(1));
    }

    #[test]
    fn test_unreadable_line_is_skipped_with_warning() {
        let lines = ["Rushing gp att gain loss net avg td long avg/g", "9 Short, Al 3 4"];
        let report = parse_lines(lines);
        assert!(report.records.is_empty());
        assert!(matches!(&report.warnings[0], ParseWarning::SkippedRow { section, .. } if section == "rushing"));
    }
}
