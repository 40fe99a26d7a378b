//! Data models for the storage layer

use serde::{Deserialize, Serialize};

use crate::cli::types::RosterRole;
use crate::error::{CricketError, Result};

/// A row of the `players` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub role: String,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
}

/// Fields for a new roster row
#[derive(Debug, Clone, PartialEq)]
pub struct NewRosterPlayer {
    pub name: String,
    pub country: String,
    pub role: RosterRole,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
}

impl NewRosterPlayer {
    /// The name must be non-empty after trimming.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CricketError::InvalidInput {
                message: "Player name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterUpdate {
    pub name: Option<String>,
    pub country: Option<String>,
    pub role: Option<RosterRole>,
    pub matches: Option<u32>,
    pub runs: Option<u32>,
    pub wickets: Option<u32>,
}

impl RosterUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A supplied name must be non-empty after trimming.
    pub fn validate(&self) -> Result<()> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(CricketError::InvalidInput {
                message: "Player name cannot be empty".to_string(),
            });
        }
        if self.is_empty() {
            return Err(CricketError::InvalidInput {
                message: "Nothing to update".to_string(),
            });
        }
        Ok(())
    }
}
