//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use clap::Parser;
use cricbuzz_analytics::{
    cli::{Commands, Cricbuzz, PlayerCmd, QueryCmd},
    commands::{
        matches::handle_matches,
        player::{handle_player_search, handle_player_stats},
        query::{handle_query_all, handle_query_list, handle_query_run},
        roster::handle_roster,
        scorecard::handle_scorecard,
        CommandContext,
    },
    config::AppConfig,
    Result,
};

/// Run the CLI.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env is normal
    let _ = dotenvy::dotenv();

    let app = Cricbuzz::parse();
    let default_level = if app.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(app).await {
        if e.is_user_warning() {
            println!("⚠ {}", e);
        } else {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(app: Cricbuzz) -> Result<()> {
    let config = AppConfig::from_env();

    match app.command {
        Commands::Matches { listing, output } => {
            let ctx = CommandContext::new(config)?;
            handle_matches(&ctx, listing, output.format()).await?
        }

        Commands::Scorecard { match_id, output } => {
            let ctx = CommandContext::new(config)?;
            handle_scorecard(&ctx, match_id, output.format()).await?
        }

        Commands::Player { cmd } => {
            let ctx = CommandContext::new(config)?;
            match cmd {
                PlayerCmd::Search { name, output } => {
                    handle_player_search(&ctx, &name, output.format()).await?
                }
                PlayerCmd::Stats { player_id, output } => {
                    handle_player_stats(&ctx, player_id, output.format()).await?
                }
            }
        }

        Commands::Query { cmd } => match cmd {
            QueryCmd::List => handle_query_list(),
            QueryCmd::Run {
                query,
                args,
                output,
            } => {
                let ctx = CommandContext::new(config)?;
                handle_query_run(&ctx, query, &args.params(), output.format()).await?
            }
            QueryCmd::All { args, output } => {
                let ctx = CommandContext::new(config)?;
                handle_query_all(&ctx, &args.params(), output.format()).await?
            }
        },

        Commands::Roster { cmd } => handle_roster(&config, cmd.into_action())?,
    }

    Ok(())
}
