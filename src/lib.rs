//! NBA Intel Library
//!
//! Player point forecasts from the NBA stats API: rosters, season and recent
//! averages, head-to-head history and opponent defence, combined into an
//! expectation that a user's own prediction is judged against.
//!
//! ## Features
//!
//! - **Stats Retrieval**: rosters, dashboards, game logs and team defence from `stats.nba.com`
//! - **TTL Cache**: in-memory LRU backed by JSON files, so repeated lookups stay offline
//! - **Forecasts**: weighted averages adjusted for defensive rank, pace and blowouts
//! - **Verdicts**: Likely / Uncertain / Unlikely, in English or Portuguese
//! - **Journal**: every judged prediction kept in a local SQLite database
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nba_intel::model::{judge, ForecastInputs, ForecastModel, Thresholds};
//!
//! # fn example() -> nba_intel::Result<()> {
//! let mut inputs = ForecastInputs::from_season_average(26.4);
//! inputs.recent_avg = Some(29.0);
//! inputs.defense_rank = Some(4);
//!
//! let forecast = ForecastModel::default().forecast(&inputs);
//! let judgement = judge(31.0, forecast.expectation, &Thresholds::default())?;
//! println!("{} ({:.1})", judgement.verdict, forecast.expectation);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export NBA_INTEL_SEASON=2025            # default season for every command
//! export NBA_INTEL_CONFIG=~/model.toml    # model weights and thresholds
//! export NBA_INTEL_CACHE_DIR=/tmp/nba     # cache and journal location
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod nba;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Locale, PlayerId, Season, StatCategory, TeamId};
pub use error::{IntelError, Result};

pub const SEASON_ENV_VAR: &str = "NBA_INTEL_SEASON";
pub const CONFIG_ENV_VAR: &str = "NBA_INTEL_CONFIG";
pub const CACHE_DIR_ENV_VAR: &str = "NBA_INTEL_CACHE_DIR";
pub const BASE_URL_ENV_VAR: &str = "NBA_STATS_BASE_URL";
