//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{MatchId, MatchListing, PlayerId, RosterRole, SeriesId, TeamId};

use crate::analysis::QueryId;
use crate::commands::query::{QueryParams, DEFAULT_SERIES_ID, DEFAULT_TEAM_ID};
use crate::commands::roster::RosterAction;
use crate::commands::OutputFormat;
use crate::storage::{NewRosterPlayer, RosterUpdate};

/// Output selection shared by the table-printing commands
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output results as JSON instead of a text table.
    #[clap(long)]
    pub json: bool,

    /// Output results as CSV.
    #[clap(long, conflicts_with = "json")]
    pub csv: bool,
}

impl OutputArgs {
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_flags(self.json, self.csv)
    }
}

/// Inputs for `query run` and `query all`
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Team for the squad query (Q1).
    #[clap(long, default_value_t = TeamId::new(DEFAULT_TEAM_ID))]
    pub team_id: TeamId,

    /// Series for the home/away query (Q12).
    #[clap(long, default_value_t = SeriesId::new(DEFAULT_SERIES_ID))]
    pub series_id: SeriesId,

    /// Report this pair in the head-to-head query (Q22): `--teams India Australia`.
    #[clap(long, num_args = 2, value_names = ["TEAM_A", "TEAM_B"])]
    pub teams: Option<Vec<String>>,

    /// Delete the query's snapshot and fetch it again.
    #[clap(long)]
    pub refresh: bool,
}

impl QueryArgs {
    pub fn params(&self) -> QueryParams {
        QueryParams {
            team_id: self.team_id,
            series_id: self.series_id,
            teams: match self.teams.as_deref() {
                Some([a, b]) => Some((a.clone(), b.clone())),
                _ => None,
            },
            refresh: self.refresh,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Search players by name.
    Search {
        name: String,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Batting and bowling career tables of a player.
    Stats {
        player_id: PlayerId,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum QueryCmd {
    /// List the 25 queries.
    List,

    /// Run one query by number (`7` or `Q7`).
    Run {
        query: QueryId,

        #[clap(flatten)]
        args: QueryArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Run every query and summarise the failures.
    All {
        #[clap(flatten)]
        args: QueryArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum RosterCmd {
    /// List roster players, optionally filtered by name or country.
    List {
        #[clap(long, short)]
        search: Option<String>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Add a player.
    Add {
        #[clap(long)]
        name: String,

        #[clap(long, default_value = "")]
        country: String,

        #[clap(long, value_enum)]
        role: RosterRole,

        #[clap(long, default_value_t = 0)]
        matches: u32,

        #[clap(long, default_value_t = 0)]
        runs: u32,

        #[clap(long, default_value_t = 0)]
        wickets: u32,
    },

    /// Change fields of an existing player.
    Update {
        id: i64,

        #[clap(long)]
        name: Option<String>,

        #[clap(long)]
        country: Option<String>,

        #[clap(long, value_enum)]
        role: Option<RosterRole>,

        #[clap(long)]
        matches: Option<u32>,

        #[clap(long)]
        runs: Option<u32>,

        #[clap(long)]
        wickets: Option<u32>,
    },

    /// Delete a player.
    Delete { id: i64 },
}

impl RosterCmd {
    pub fn into_action(self) -> RosterAction {
        match self {
            RosterCmd::List { search, output } => RosterAction::List {
                search,
                format: output.format(),
            },
            RosterCmd::Add {
                name,
                country,
                role,
                matches,
                runs,
                wickets,
            } => RosterAction::Add(NewRosterPlayer {
                name,
                country,
                role,
                matches,
                runs,
                wickets,
            }),
            RosterCmd::Update {
                id,
                name,
                country,
                role,
                matches,
                runs,
                wickets,
            } => RosterAction::Update(
                id,
                RosterUpdate {
                    name,
                    country,
                    role,
                    matches,
                    runs,
                    wickets,
                },
            ),
            RosterCmd::Delete { id } => RosterAction::Delete(id),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "cricbuzz", about = "Cricbuzz cricket analytics CLI", version)]
pub struct Cricbuzz {
    /// Debug logging (request URLs, snapshot hits).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Live, recent or upcoming matches.
    Matches {
        #[clap(value_enum)]
        listing: MatchListing,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Batting and bowling tables of one match.
    Scorecard {
        match_id: MatchId,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Player search and career statistics.
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// The 25 analytical queries.
    Query {
        #[clap(subcommand)]
        cmd: QueryCmd,
    },

    /// The local player roster.
    Roster {
        #[clap(subcommand)]
        cmd: RosterCmd,
    },
}
