//! Entry point: parse CLI, set up logging, and dispatch to command handlers.

use clap::Parser;
use nba_intel::{
    cli::{Commands, NbaIntel},
    commands::{
        averages::handle_averages,
        defense::handle_defense,
        history::handle_history,
        outlook::handle_outlook,
        predict::{handle_predict, PredictParams, Predictions},
        roster::handle_roster,
        teams::handle_teams,
        CommandContext,
    },
    render::Painter,
    Result,
};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so `--json` output on stdout stays clean.
fn init_logging(debug: bool) {
    let default = if debug { "warn,nba_intel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .try_init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = NbaIntel::parse();
    let common = app.command.common().clone();
    init_logging(common.debug);

    match app.command {
        Commands::Teams { common } => handle_teams(common.json)?,

        Commands::Roster { team, common } => {
            let ctx = CommandContext::new(&common)?;
            handle_roster(&ctx, &team).await?
        }

        Commands::Averages {
            select,
            last_n,
            common,
        } => {
            let ctx = CommandContext::new(&common)?;
            handle_averages(&ctx, &select.team, &select.player, last_n).await?
        }

        Commands::Defense { common } => {
            let ctx = CommandContext::new(&common)?;
            handle_defense(&ctx).await?
        }

        Commands::Predict {
            select,
            opponent,
            points,
            assists,
            rebounds,
            steals,
            blocks,
            last_n,
            blowout,
            no_pace,
            no_save,
            common,
        } => {
            let ctx = CommandContext::new(&common)?;
            handle_predict(
                &ctx,
                PredictParams {
                    team: select.team,
                    player: select.player,
                    opponent,
                    predictions: Predictions {
                        points,
                        assists,
                        rebounds,
                        steals,
                        blocks,
                    },
                    last_n,
                    blowout,
                    no_pace,
                    save: !no_save,
                },
            )
            .await?
        }

        Commands::Outlook {
            team,
            opponent,
            top,
            common,
        } => {
            let ctx = CommandContext::new(&common)?;
            handle_outlook(&ctx, &team, &opponent, top).await?
        }

        Commands::History {
            player,
            limit,
            clear,
            common: _,
        } => handle_history(
            player.as_deref(),
            limit,
            clear,
            common.json,
            common.lang,
            &Painter::detect(common.no_color),
        )?,
    }

    Ok(())
}
