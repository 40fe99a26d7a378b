//! Enumerations selected on the command line.

use crate::error::{CricketError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which match feed to list.
///
/// Live and recent feeds are shown most recent first, upcoming fixtures
/// soonest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum MatchListing {
    /// Matches currently in progress
    Live,
    /// Recently completed matches
    Recent,
    /// Scheduled fixtures
    Upcoming,
}

impl MatchListing {
    /// Path segment under `matches/v1/`.
    pub fn as_path(&self) -> &'static str {
        match self {
            MatchListing::Live => "live",
            MatchListing::Recent => "recent",
            MatchListing::Upcoming => "upcoming",
        }
    }

    pub fn most_recent_first(&self) -> bool {
        !matches!(self, MatchListing::Upcoming)
    }
}

impl fmt::Display for MatchListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchListing::Live => "Live",
            MatchListing::Recent => "Recent",
            MatchListing::Upcoming => "Upcoming",
        };
        write!(f, "{}", s)
    }
}

/// Playing role of a roster player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum RosterRole {
    Batsman,
    Bowler,
    #[value(name = "all-rounder", alias = "allrounder")]
    #[serde(rename = "All-rounder")]
    AllRounder,
    Wicketkeeper,
}

impl fmt::Display for RosterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RosterRole::Batsman => "Batsman",
            RosterRole::Bowler => "Bowler",
            RosterRole::AllRounder => "All-rounder",
            RosterRole::Wicketkeeper => "Wicketkeeper",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RosterRole {
    type Err = CricketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "").as_str() {
            "batsman" => Ok(RosterRole::Batsman),
            "bowler" => Ok(RosterRole::Bowler),
            "allrounder" => Ok(RosterRole::AllRounder),
            "wicketkeeper" => Ok(RosterRole::Wicketkeeper),
            _ => Err(CricketError::InvalidInput {
                message: format!("Unknown roster role: {}", s),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_paths_and_order() {
        assert_eq!(MatchListing::Live.as_path(), "live");
        assert_eq!(MatchListing::Upcoming.as_path(), "upcoming");
        assert!(MatchListing::Recent.most_recent_first());
        assert!(!MatchListing::Upcoming.most_recent_first());
    }

    #[test]
    fn test_roster_role_round_trip_display() {
        for role in [
            RosterRole::Batsman,
            RosterRole::Bowler,
            RosterRole::AllRounder,
            RosterRole::Wicketkeeper,
        ] {
            assert_eq!(role.to_string().parse::<RosterRole>().unwrap(), role);
        }
        assert_eq!("all rounder".parse::<RosterRole>().unwrap(), RosterRole::AllRounder);
        assert!("captain".parse::<RosterRole>().is_err());
    }
}
