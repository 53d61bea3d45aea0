//! Data models for the storage layer

use serde::{Deserialize, Serialize};

use crate::{model::Verdict, PlayerId, Season, StatCategory};

/// A judged prediction, as written to the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewForecast {
    pub player_id: PlayerId,
    pub player_name: String,
    pub opponent: String,
    pub season: Season,
    pub stat: StatCategory,
    pub prediction: f64,
    pub expectation: f64,
    pub verdict: Verdict,
}

/// A journal row read back from the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub id: i64,
    #[serde(flatten)]
    pub forecast: NewForecast,
    pub created_at: u64,
}
