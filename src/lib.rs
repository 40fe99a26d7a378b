//! Cricbuzz Analytics Library
//!
//! Fetches cricket data from the Cricbuzz REST API (via RapidAPI),
//! flattens the nested JSON into records and answers 25 canned
//! analytical queries over them, with a small SQLite player roster on the
//! side.
//!
//! ## Features
//!
//! - **API Client**: typed endpoints with rate-limit detection
//! - **Snapshots**: every fetched data set is written once under the data
//!   directory and read from there afterwards
//! - **Flatteners**: lenient conversion of the Cricbuzz JSON shapes into
//!   flat records
//! - **Queries**: pure aggregators rendering to text, JSON or CSV tables
//! - **Roster**: list, add, update and delete players in SQLite
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricbuzz_analytics::{
//!     analysis::QueryId,
//!     commands::{query::{run_query, QueryParams}, CommandContext},
//!     config::AppConfig,
//! };
//!
//! # async fn example() -> cricbuzz_analytics::Result<()> {
//! let ctx = CommandContext::new(AppConfig::from_env())?;
//! let table = run_query(&ctx, QueryId::new(5)?, &QueryParams::default()).await?;
//! println!("{}", table.render_text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export RAPIDAPI_KEY=your-key
//! export CRICBUZZ_DATA_DIR=data
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod cricbuzz;
pub mod error;
pub mod flatten;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{MatchFormat, MatchId, PlayerId, SeriesId, TeamId, VenueId};
pub use error::{CricketError, Result};
