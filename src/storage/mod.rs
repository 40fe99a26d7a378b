//! Storage layer for the player roster
//!
//! This module wraps the SQLite roster database:
//! - `models`: Data structures
//! - `schema`: Database connection, schema and first-run seeding
//! - `queries`: CRUD operations

pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::{RosterDatabase, DEFAULT_PLAYERS};
