//! Type-safe wrappers and enums for Cricbuzz data.

pub mod filters;
pub mod format;
pub mod ids;
pub mod time;

pub use filters::{MatchListing, RosterRole};
pub use format::{CareerKind, MatchFormat};
pub use ids::{MatchId, PlayerId, SeriesId, TeamId, VenueId};
pub use time::Quarter;
