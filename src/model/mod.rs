//! The forecast heuristic and the verdict it feeds.
//!
//! - `forecast`: expected value from averages, defence and pace
//! - `verdict`: thresholding a user's prediction against the expectation
//! - `matchup`: defence-only difficulty used when no prediction is given

pub mod forecast;
pub mod matchup;
pub mod verdict;

pub use forecast::{Adjustments, Forecast, ForecastInputs, ForecastModel, ForecastWeights};
pub use matchup::matchup_difficulty;
pub use verdict::{judge, Judgement, Thresholds, Verdict};
