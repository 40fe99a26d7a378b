//! Scorecard builders for aggregator tests.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::cli::types::MatchId;
use crate::flatten::{Innings, InningsBattingEntry, InningsBowlingEntry, Scorecard};

pub fn bat(player: &str, runs: u32, balls: u32) -> InningsBattingEntry {
    InningsBattingEntry {
        position: 0,
        player_id: None,
        player: player.to_string(),
        runs,
        balls,
        strike_rate: if balls == 0 {
            0.0
        } else {
            runs as f64 * 100.0 / balls as f64
        },
        fours: 0,
        sixes: 0,
        dismissal: String::new(),
    }
}

pub fn bowl(player: &str, overs: f64, runs: u32, wickets: u32) -> InningsBowlingEntry {
    InningsBowlingEntry {
        player_id: None,
        player: player.to_string(),
        overs,
        maidens: 0,
        runs,
        wickets,
        economy: 0.0,
    }
}

/// Positions follow list order.
pub fn innings(team: &str, batting: Vec<InningsBattingEntry>, bowling: Vec<InningsBowlingEntry>) -> Innings {
    let batting = batting
        .into_iter()
        .enumerate()
        .map(|(i, mut b)| {
            b.position = i as u32 + 1;
            b
        })
        .collect();
    Innings {
        innings_id: 1,
        batting_team: team.to_string(),
        score: 0,
        wickets: 0,
        overs: 0.0,
        batting,
        bowling,
    }
}

pub fn card(id: u64, format: &str, innings: Vec<Innings>) -> Scorecard {
    Scorecard {
        match_id: MatchId::new(id),
        format: Some(format.to_string()),
        venue: None,
        status: String::new(),
        start_date: None,
        innings,
    }
}

pub fn at_venue(mut card: Scorecard, venue: &str) -> Scorecard {
    card.venue = Some(venue.to_string());
    card
}

pub fn on(mut card: Scorecard, year: i32, month: u32, day: u32) -> Scorecard {
    card.start_date = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| Utc.from_utc_datetime(&d));
    card
}
