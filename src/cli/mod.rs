//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{Locale, Season};

/// Flags every subcommand accepts.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Season start year or `2025-26` (or set `NBA_INTEL_SEASON`).
    #[clap(long, short, env = "NBA_INTEL_SEASON", default_value_t = Season::default())]
    pub season: Season,

    /// Force refresh from the stats API even if cached data exists.
    #[clap(long)]
    pub refresh: bool,

    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,

    /// Print request URLs and debug logs.
    #[clap(long)]
    pub debug: bool,

    /// Disable ANSI colours (also honoured: `NO_COLOR`).
    #[clap(long)]
    pub no_color: bool,

    /// Language for verdict labels: `en` or `pt`.
    #[clap(long, default_value_t = Locale::default())]
    pub lang: Locale,

    /// Model configuration file (or set `NBA_INTEL_CONFIG`).
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Team and player selection.
#[derive(Debug, Clone, Args)]
pub struct PlayerSelect {
    /// Team name, abbreviation or id (e.g. `BOS`, `celtics`).
    #[clap(long, short)]
    pub team: String,

    /// Player name (substring match) or player id.
    #[clap(long, short)]
    pub player: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the 30 franchises with their ids and abbreviations.
    Teams {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// List a team's roster for the season.
    Roster {
        /// Team name, abbreviation or id.
        #[clap(long, short)]
        team: String,

        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Show a player's season averages and recent form.
    Averages {
        #[clap(flatten)]
        select: PlayerSelect,

        /// Number of recent games to average (overrides the config file).
        #[clap(long)]
        last_n: Option<usize>,

        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Rank every team by defensive rating, with pace.
    Defense {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Judge a prediction against the computed expectation.
    ///
    /// Combines season, recent and head-to-head averages, adjusts for the
    /// opponent's defence and pace, and prints a verdict per category.
    Predict {
        #[clap(flatten)]
        select: PlayerSelect,

        /// Opponent team name, abbreviation or id.
        #[clap(long, short)]
        opponent: String,

        /// Predicted points.
        #[clap(long)]
        points: f64,

        /// Predicted assists.
        #[clap(long)]
        assists: Option<f64>,

        /// Predicted rebounds.
        #[clap(long)]
        rebounds: Option<f64>,

        /// Predicted steals.
        #[clap(long)]
        steals: Option<f64>,

        /// Predicted blocks.
        #[clap(long)]
        blocks: Option<f64>,

        /// Number of recent games to average (overrides the config file).
        #[clap(long)]
        last_n: Option<usize>,

        /// Expect a blowout and reduced minutes.
        #[clap(long)]
        blowout: bool,

        /// Ignore the opponent's pace.
        #[clap(long)]
        no_pace: bool,

        /// Do not record the prediction in the journal.
        #[clap(long)]
        no_save: bool,

        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Expected points for every player on a roster against an opponent.
    Outlook {
        /// Team name, abbreviation or id.
        #[clap(long, short)]
        team: String,

        /// Opponent team name, abbreviation or id.
        #[clap(long, short)]
        opponent: String,

        /// Only list the top N players.
        #[clap(long)]
        top: Option<usize>,

        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Show (or clear) the journal of past predictions.
    History {
        /// Filter by player name (substring match).
        #[clap(long, short)]
        player: Option<String>,

        /// Maximum number of entries to show.
        #[clap(long, default_value_t = 20)]
        limit: usize,

        /// Delete every journal entry.
        #[clap(long)]
        clear: bool,

        #[clap(flatten)]
        common: CommonArgs,
    },
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Teams { common }
            | Commands::Roster { common, .. }
            | Commands::Averages { common, .. }
            | Commands::Defense { common }
            | Commands::Predict { common, .. }
            | Commands::Outlook { common, .. }
            | Commands::History { common, .. } => common,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(
    name = "nba-intel",
    about = "NBA player forecasts: judge your prediction against the numbers"
)]
pub struct NbaIntel {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict() {
        let app = NbaIntel::try_parse_from([
            "nba-intel", "predict", "-t", "BOS", "-p", "Tatum", "-o", "NYK", "--points", "27.5",
            "--rebounds", "8", "--blowout", "--lang", "pt", "--season", "2024-25",
        ])
        .unwrap();

        match app.command {
            Commands::Predict {
                select,
                opponent,
                points,
                rebounds,
                assists,
                blowout,
                no_pace,
                common,
                ..
            } => {
                assert_eq!(select.team, "BOS");
                assert_eq!(select.player, "Tatum");
                assert_eq!(opponent, "NYK");
                assert_eq!(points, 27.5);
                assert_eq!(rebounds, Some(8.0));
                assert_eq!(assists, None);
                assert!(blowout);
                assert!(!no_pace);
                assert_eq!(common.lang, Locale::Pt);
                assert_eq!(common.season, Season::new(2024));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_predict_requires_points() {
        let result = NbaIntel::try_parse_from([
            "nba-intel", "predict", "-t", "BOS", "-p", "Tatum", "-o", "NYK",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_history_defaults() {
        let app = NbaIntel::try_parse_from(["nba-intel", "history", "--json"]).unwrap();
        match app.command {
            Commands::History {
                player,
                limit,
                clear,
                common,
            } => {
                assert!(player.is_none());
                assert_eq!(limit, 20);
                assert!(!clear);
                assert!(common.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_language_is_rejected() {
        let result = NbaIntel::try_parse_from(["nba-intel", "teams", "--lang", "fr"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_common_accessor() {
        let app = NbaIntel::try_parse_from(["nba-intel", "defense", "--refresh"]).unwrap();
        assert!(app.command.common().refresh);
    }
}
