//! ID types for the NBA stats API.

use crate::error::{IntelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NBA team IDs.
///
/// The stats API numbers franchises from `1610612737` (Atlanta) upwards;
/// keeping them in a newtype prevents mixing them up with player IDs.
///
/// # Examples
///
/// ```rust
/// use nba_intel::TeamId;
///
/// let celtics = TeamId::new(1610612738);
/// assert_eq!(celtics.as_u32(), 1610612738);
/// assert_eq!(celtics.to_string(), "1610612738");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    /// Create a new TeamId from a u32 value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for Player IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_round_trip_display() {
        let id: TeamId = "1610612747".parse().unwrap();
        assert_eq!(id, TeamId::new(1610612747));
        assert_eq!(id.to_string(), "1610612747");
    }

    #[test]
    fn test_player_id_parse_trims_whitespace() {
        let id: PlayerId = " 2544 ".parse().unwrap();
        assert_eq!(id.as_u64(), 2544);
    }

    #[test]
    fn test_invalid_ids() {
        assert!("lakers".parse::<TeamId>().is_err());
        assert!("-5".parse::<PlayerId>().is_err());
    }
}
