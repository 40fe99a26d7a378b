//! Database schema and connection management

use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// Rows inserted into an empty roster: name, country, role, matches, runs, wickets.
pub const DEFAULT_PLAYERS: [(&str, &str, &str, u32, u32, u32); 10] = [
    ("Virat Kohli", "India", "Batsman", 275, 12898, 4),
    ("Rohit Sharma", "India", "Batsman", 243, 9837, 8),
    ("Jasprit Bumrah", "India", "Bowler", 72, 120, 121),
    ("Steve Smith", "Australia", "Batsman", 142, 4917, 28),
    ("Pat Cummins", "Australia", "Bowler", 75, 340, 124),
    ("Joe Root", "England", "Batsman", 158, 6207, 26),
    ("Kane Williamson", "New Zealand", "Batsman", 161, 6554, 37),
    ("Babar Azam", "Pakistan", "Batsman", 105, 5089, 0),
    ("Rashid Khan", "Afghanistan", "Bowler", 94, 1200, 172),
    ("Quinton de Kock", "South Africa", "Wicketkeeper", 145, 5966, 0),
];

/// Connection to the roster database
pub struct RosterDatabase {
    pub(crate) conn: Connection,
}

impl RosterDatabase {
    /// Open (creating if needed) the database at `path`, ensure the schema
    /// exists and seed an empty roster.
    pub fn new(path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        db.seed_defaults()?;
        Ok(db)
    }

    /// Unseeded in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let mut db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                country TEXT NOT NULL DEFAULT '',
                role TEXT NOT NULL,
                matches INTEGER NOT NULL DEFAULT 0,
                runs INTEGER NOT NULL DEFAULT 0,
                wickets INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_name ON players(name)",
            [],
        )?;

        Ok(())
    }

    /// Insert [`DEFAULT_PLAYERS`] when the table is empty. Returns the
    /// number of rows inserted.
    pub fn seed_defaults(&mut self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO players (name, country, role, matches, runs, wickets)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            for (name, country, role, matches, runs, wickets) in DEFAULT_PLAYERS {
                stmt.execute(params![name, country, role, matches, runs, wickets])?;
            }
        }
        tx.commit()?;
        log::info!("seeded roster with {} players", DEFAULT_PLAYERS.len());
        Ok(DEFAULT_PLAYERS.len())
    }
}
