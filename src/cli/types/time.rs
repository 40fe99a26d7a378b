//! Calendar quarters for time-series analysis.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar quarter such as `2024Q3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quarter {
    pub year: i32,
    pub quarter: u8,
}

impl Quarter {
    pub fn new(year: i32, quarter: u8) -> Self {
        Self { year, quarter }
    }

    pub fn of(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as u8,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_quarter_of_date() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let sep = Utc.with_ymd_and_hms(2024, 9, 30, 23, 0, 0).unwrap();
        let oct = Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap();

        assert_eq!(Quarter::of(&jan), Quarter::new(2024, 1));
        assert_eq!(Quarter::of(&sep), Quarter::new(2024, 3));
        assert_eq!(Quarter::of(&oct).to_string(), "2024Q4");
    }

    #[test]
    fn test_quarters_order_chronologically() {
        assert!(Quarter::new(2023, 4) < Quarter::new(2024, 1));
        assert!(Quarter::new(2024, 1) < Quarter::new(2024, 2));
    }
}
