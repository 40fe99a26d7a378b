//! Match outcome parsing from free-text status lines such as
//! `"India won by 7 wkts"` or `"Australia won by 295 runs"`.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VictoryType {
    Runs,
    Wickets,
}

impl fmt::Display for VictoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VictoryType::Runs => write!(f, "Runs"),
            VictoryType::Wickets => write!(f, "Wickets"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// Winner as written in the status line.
    pub winner: String,
    pub margin: Option<u32>,
    pub victory_type: Option<VictoryType>,
}

impl MatchOutcome {
    /// Decided by at most 10 runs or at most 2 wickets.
    pub fn is_close(&self) -> bool {
        match (self.victory_type, self.margin) {
            (Some(VictoryType::Runs), Some(m)) => m <= 10,
            (Some(VictoryType::Wickets), Some(m)) => m <= 2,
            _ => false,
        }
    }

    pub fn won_by(&self, team: &str) -> bool {
        !team.is_empty() && self.winner.eq_ignore_ascii_case(team.trim())
    }
}

const WON: &str = " won ";

/// `None` when the status has no `" won "`; a win without a numeric
/// margin (`"won by an innings and 20 runs"`) has no margin or type.
pub fn parse_outcome(status: &str) -> Option<MatchOutcome> {
    let lower = status.to_lowercase();
    let idx = lower.find(WON)?;
    let winner = status.get(..idx).unwrap_or_default().trim().to_string();
    if winner.is_empty() {
        return None;
    }

    let rest = &lower[idx + WON.len()..];
    let mut tokens = rest.split_whitespace();
    let (margin, victory_type) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some("by"), Some(n), Some(unit)) => match n.parse::<u32>() {
            Ok(margin) => match victory_unit(unit) {
                Some(kind) => (Some(margin), Some(kind)),
                None => (None, None),
            },
            Err(_) => (None, None),
        },
        _ => (None, None),
    };

    Some(MatchOutcome {
        winner,
        margin,
        victory_type,
    })
}

fn victory_unit(token: &str) -> Option<VictoryType> {
    if token.starts_with("run") {
        Some(VictoryType::Runs)
    } else if token.starts_with("wkt") || token.starts_with("wicket") {
        Some(VictoryType::Wickets)
    } else {
        None
    }
}

/// Winner for win counting: the text before `" won "` in the lower-cased
/// status, title-cased.
pub fn winner_title(status: &str) -> Option<String> {
    let lower = status.to_lowercase();
    let (winner, _) = lower.split_once(WON)?;
    let winner = winner.trim();
    (!winner.is_empty()).then(|| title_case(winner))
}

/// Upper-case the first letter of every word, lower-case the rest.
/// Any non-letter starts a new word (`"royal challengers-b"` →
/// `"Royal Challengers-B"`).
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runs_and_wickets() {
        let runs = parse_outcome("Australia won by 295 runs").unwrap();
        assert_eq!(runs.winner, "Australia");
        assert_eq!(runs.margin, Some(295));
        assert_eq!(runs.victory_type, Some(VictoryType::Runs));

        let wkts = parse_outcome("India Won by 7 wkts").unwrap();
        assert_eq!(wkts.winner, "India");
        assert_eq!(wkts.victory_type, Some(VictoryType::Wickets));

        let wickets = parse_outcome("England won by 1 wicket (with 4 balls remaining)").unwrap();
        assert_eq!(wickets.margin, Some(1));
        assert_eq!(wickets.victory_type, Some(VictoryType::Wickets));
    }

    #[test]
    fn test_win_without_margin() {
        let innings = parse_outcome("India won by an innings and 20 runs").unwrap();
        assert_eq!(innings.winner, "India");
        assert_eq!(innings.margin, None);
        assert_eq!(innings.victory_type, None);
        assert!(!innings.is_close());
    }

    #[test]
    fn test_no_outcome() {
        assert!(parse_outcome("Match drawn").is_none());
        assert!(parse_outcome("No result").is_none());
        assert!(parse_outcome("India opt to bat").is_none());
        assert!(parse_outcome(" won by 5 runs").is_none());
    }

    #[test]
    fn test_close_match_thresholds() {
        let close = |s: &str| parse_outcome(s).map(|o| o.is_close()).unwrap_or(false);
        assert!(close("A won by 7 runs"));
        assert!(close("A won by 10 runs"));
        assert!(!close("A won by 15 runs"));
        assert!(close("A won by 2 wkts"));
        assert!(!close("A won by 3 wkts"));
    }

    #[test]
    fn test_winner_title() {
        assert_eq!(winner_title("NEW ZEALAND won by 8 wkts").as_deref(), Some("New Zealand"));
        assert_eq!(winner_title("sri lanka won by 3 runs").as_deref(), Some("Sri Lanka"));
        assert_eq!(winner_title("Match tied"), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("royal challengers-b"), "Royal Challengers-B");
        assert_eq!(title_case("BATSMEN"), "Batsmen");
        assert_eq!(title_case("all rounder"), "All Rounder");
    }

    #[test]
    fn test_won_by_ignores_case() {
        let outcome = parse_outcome("India won by 7 wkts").unwrap();
        assert!(outcome.won_by("INDIA"));
        assert!(!outcome.won_by("Pakistan"));
        assert!(!outcome.won_by(""));
    }
}
