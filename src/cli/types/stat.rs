//! Box-score categories the forecast works on.

use crate::error::IntelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A per-game counting stat.
///
/// These are the five categories the forecast, the verdict cards and the
/// bar chart all iterate over, in this order.
///
/// # Examples
///
/// ```rust
/// use nba_intel::StatCategory;
///
/// let pts: StatCategory = "pts".parse().unwrap();
/// assert_eq!(pts, StatCategory::Points);
/// assert_eq!(pts.short_label(), "PTS");
/// assert_eq!(pts.to_string(), "POINTS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Points,
    Assists,
    Rebounds,
    Steals,
    Blocks,
}

impl StatCategory {
    pub const ALL: [StatCategory; 5] = [
        StatCategory::Points,
        StatCategory::Assists,
        StatCategory::Rebounds,
        StatCategory::Steals,
        StatCategory::Blocks,
    ];

    /// Column header used by the stats API.
    pub fn short_label(&self) -> &'static str {
        match self {
            StatCategory::Points => "PTS",
            StatCategory::Assists => "AST",
            StatCategory::Rebounds => "REB",
            StatCategory::Steals => "STL",
            StatCategory::Blocks => "BLK",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatCategory::Points => "POINTS",
            StatCategory::Assists => "ASSISTS",
            StatCategory::Rebounds => "REBOUNDS",
            StatCategory::Steals => "STEALS",
            StatCategory::Blocks => "BLOCKS",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for StatCategory {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pts" | "points" | "pontos" => Ok(StatCategory::Points),
            "ast" | "assists" | "assist" => Ok(StatCategory::Assists),
            "reb" | "rebounds" => Ok(StatCategory::Rebounds),
            "stl" | "steals" => Ok(StatCategory::Steals),
            "blk" | "blocks" => Ok(StatCategory::Blocks),
            _ => Err(IntelError::InvalidStat {
                stat: s.to_string(),
            }),
        }
    }
}
