//! Roster CRUD operations

use super::{models::*, schema::RosterDatabase};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

const SELECT_COLUMNS: &str = "SELECT id, name, country, role, matches, runs, wickets FROM players";

impl RosterDatabase {
    /// All players ordered by id. A non-empty `search` keeps rows whose
    /// name or country contains it, ignoring ASCII case.
    pub fn list_players(&self, search: Option<&str>) -> Result<Vec<RosterPlayer>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let players = match search {
            Some(term) => {
                let pattern = format!("%{}%", term);
                let mut stmt = self.conn.prepare(&format!(
                    "{} WHERE name LIKE ?1 OR country LIKE ?1 ORDER BY id",
                    SELECT_COLUMNS
                ))?;
                let rows = stmt.query_map(params![pattern], Self::row_to_player)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
                let rows = stmt.query_map([], Self::row_to_player)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(players)
    }

    pub fn get_player(&self, id: i64) -> Result<Option<RosterPlayer>> {
        let player = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![id],
                Self::row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    /// Insert a player and return its id.
    pub fn add_player(&mut self, player: &NewRosterPlayer) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO players (name, country, role, matches, runs, wickets)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                player.name.trim(),
                player.country.trim(),
                player.role.to_string(),
                player.matches,
                player.runs,
                player.wickets
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Apply the supplied fields; returns the number of rows changed
    /// (0 when the id is absent).
    pub fn update_player(&mut self, id: i64, update: &RosterUpdate) -> Result<usize> {
        let rows_affected = self.conn.execute(
            "UPDATE players SET
                name = COALESCE(?, name),
                country = COALESCE(?, country),
                role = COALESCE(?, role),
                matches = COALESCE(?, matches),
                runs = COALESCE(?, runs),
                wickets = COALESCE(?, wickets)
             WHERE id = ?",
            params![
                update.name.as_deref().map(str::trim),
                update.country.as_deref().map(str::trim),
                update.role.map(|r| r.to_string()),
                update.matches,
                update.runs,
                update.wickets,
                id
            ],
        )?;
        Ok(rows_affected)
    }

    /// Returns the number of rows removed (0 when the id is absent).
    pub fn delete_player(&mut self, id: i64) -> Result<usize> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM players WHERE id = ?", params![id])?;
        Ok(rows_affected)
    }

    pub fn count_players(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_player(row: &Row) -> rusqlite::Result<RosterPlayer> {
        Ok(RosterPlayer {
            id: row.get(0)?,
            name: row.get(1)?,
            country: row.get(2)?,
            role: row.get(3)?,
            matches: row.get(4)?,
            runs: row.get(5)?,
            wickets: row.get(6)?,
        })
    }
}
