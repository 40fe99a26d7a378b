//! Cricket formats and career table kinds.

use crate::error::{CricketError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// International match formats.
///
/// Cricbuzz labels T20 internationals as either `T20` or `T20I` depending
/// on the feed; both map to [`MatchFormat::T20I`].
///
/// # Examples
///
/// ```rust
/// use cricbuzz_analytics::MatchFormat;
///
/// assert_eq!(MatchFormat::from_label("T20"), Some(MatchFormat::T20I));
/// assert_eq!(MatchFormat::T20I.to_string(), "T20I");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    Test,
    ODI,
    T20I,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [MatchFormat::Test, MatchFormat::ODI, MatchFormat::T20I];

    /// Map a feed label onto a format, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "TEST" => Some(MatchFormat::Test),
            "ODI" => Some(MatchFormat::ODI),
            "T20" | "T20I" => Some(MatchFormat::T20I),
            _ => None,
        }
    }

    /// Whether a career table header names this format.
    pub fn matches_label(&self, label: &str) -> bool {
        Self::from_label(label) == Some(*self)
    }
}

/// Replace the `T20` label with `T20I`, leaving other labels untouched.
pub fn normalize_format_label(label: &str) -> String {
    if label.trim() == "T20" {
        "T20I".to_string()
    } else {
        label.trim().to_string()
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchFormat::Test => "Test",
            MatchFormat::ODI => "ODI",
            MatchFormat::T20I => "T20I",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MatchFormat {
    type Err = CricketError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| CricketError::InvalidInput {
            message: format!("Unknown match format: {}", s),
        })
    }
}

/// The two career stat tables Cricbuzz publishes per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareerKind {
    Batting,
    Bowling,
}

impl CareerKind {
    pub fn as_path(&self) -> &'static str {
        match self {
            CareerKind::Batting => "batting",
            CareerKind::Bowling => "bowling",
        }
    }
}

impl fmt::Display for CareerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CareerKind::Batting => "Batting",
            CareerKind::Bowling => "Bowling",
        };
        write!(f, "{}", s)
    }
}
