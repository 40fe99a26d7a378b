//! ID types for Cricbuzz entities.

use crate::error::{CricketError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! cricbuzz_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CricketError;

            fn from_str(s: &str) -> Result<Self> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

cricbuzz_id!(
    /// Type-safe wrapper for Cricbuzz match ids.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cricbuzz_analytics::MatchId;
    ///
    /// let id: MatchId = "139263".parse().unwrap();
    /// assert_eq!(id.as_u64(), 139263);
    /// assert_eq!(id.to_string(), "139263");
    /// ```
    MatchId
);

cricbuzz_id!(
    /// Type-safe wrapper for Cricbuzz player ids.
    PlayerId
);

cricbuzz_id!(
    /// Type-safe wrapper for Cricbuzz team ids (India is 2).
    TeamId
);

cricbuzz_id!(
    /// Type-safe wrapper for Cricbuzz venue ids.
    VenueId
);

cricbuzz_id!(
    /// Type-safe wrapper for Cricbuzz series ids.
    SeriesId
);

impl Default for TeamId {
    fn default() -> Self {
        Self(2)
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self(6732)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_parse_and_display() {
        let player: PlayerId = " 1413 ".parse().unwrap();
        assert_eq!(player.as_u64(), 1413);
        assert_eq!(player.to_string(), "1413");

        assert!("abc".parse::<VenueId>().is_err());
    }

    #[test]
    fn test_default_team_and_series() {
        assert_eq!(TeamId::default(), TeamId::new(2));
        assert_eq!(SeriesId::default(), SeriesId::new(6732));
    }

    #[test]
    fn test_ids_order_numerically() {
        let mut ids = vec![MatchId::new(30), MatchId::new(4), MatchId::new(120)];
        ids.sort();
        assert_eq!(ids, vec![MatchId::new(4), MatchId::new(30), MatchId::new(120)]);
    }
}
