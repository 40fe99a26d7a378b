//! Command implementations for the Cricbuzz analytics CLI

pub mod common;
pub mod matches;
pub mod player;
pub mod query;
pub mod roster;
pub mod scorecard;


pub use common::{CommandContext, OutputFormat};
