//! Cricbuzz API access: the HTTP client and the snapshot-first loaders
//! built on top of it.

pub mod http;
pub mod sources;

pub use http::{CricbuzzClient, FetchOutcome};
