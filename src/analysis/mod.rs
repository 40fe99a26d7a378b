//! The 25 analytical queries.
//!
//! Every aggregator is a pure function over flattened records returning
//! typed rows (see [`TableRow`]); missing input produces an empty result.
//! Loading the records is the job of [`crate::cricbuzz::sources`].

pub mod batting;
pub mod bowling;
pub mod careers;
pub mod matches;
pub mod outcome;
pub mod partnerships;
pub mod players;
pub mod series;
pub mod stats;
pub mod table;
pub mod timeseries;
pub mod toss;
pub mod venues;

#[cfg(test)]
mod fixtures;

use std::fmt;
use std::str::FromStr;

use crate::error::{CricketError, Result};

pub use outcome::{parse_outcome, title_case, winner_title, MatchOutcome, VictoryType};
pub use table::{Cell, Metric, QueryTable, TableRow};

pub const QUERY_COUNT: u8 = 25;

const TITLES: [&str; QUERY_COUNT as usize] = [
    "Players of a team",
    "Recent matches",
    "Top 10 ODI run scorers",
    "Venues with capacity above 25,000",
    "Wins per team",
    "Players per role across international teams",
    "Highest individual score per format",
    "Series started in 2024",
    "All-rounders with 1000+ runs and 50+ wickets",
    "Last 20 completed matches",
    "Runs across formats",
    "Home vs away wins",
    "Century partnerships",
    "Bowler performance by venue",
    "Batting in close matches",
    "Yearly batting since 2020",
    "Toss advantage",
    "Most economical limited-overs bowlers",
    "Batting consistency",
    "Matches and averages per format",
    "Composite ODI batting ranking",
    "Head-to-head records",
    "Recent player form",
    "Partnership success",
    "Career phases by quarter",
];

/// A query number in `1..=25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(u8);

impl QueryId {
    pub fn new(number: u8) -> Result<Self> {
        if (1..=QUERY_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(CricketError::UnknownQuery { number })
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn title(&self) -> &'static str {
        TITLES[(self.0 - 1) as usize]
    }

    pub fn all() -> impl Iterator<Item = QueryId> {
        (1..=QUERY_COUNT).map(QueryId)
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl FromStr for QueryId {
    type Err = CricketError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches(['q', 'Q']);
        let number: u8 = trimmed.parse()?;
        Self::new(number)
    }
}
