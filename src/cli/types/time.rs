//! Season type for the NBA calendar.

use crate::error::{IntelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An NBA season, identified by the year it starts in.
///
/// The stats API spells seasons as `"2025-26"`; that is what `Display`
/// produces and what every endpoint receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(start_year: u16) -> Self {
        Self(start_year)
    }

    pub fn start_year(&self) -> u16 {
        self.0
    }

    /// The season before this one (used when a player has no current-season row).
    pub fn previous(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// API form, e.g. `2025-26`.
    pub fn api_string(&self) -> String {
        format!("{}-{:02}", self.0, self.0.wrapping_add(1) % 100)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_string())
    }
}

impl FromStr for Season {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || IntelError::InvalidSeason {
            season: s.to_string(),
        };
        let trimmed = s.trim();

        let (start, suffix) = match trimmed.split_once('-') {
            Some((start, suffix)) => (start, Some(suffix)),
            None => (trimmed, None),
        };

        let year: u16 = start.parse().map_err(|_| invalid())?;
        if !(1946..=2999).contains(&year) {
            return Err(invalid());
        }

        if let Some(suffix) = suffix {
            let end: u16 = suffix.parse().map_err(|_| invalid())?;
            let expected = match suffix.len() {
                2 => (year + 1) % 100,
                4 => year + 1,
                _ => return Err(invalid()),
            };
            if end != expected {
                return Err(invalid());
            }
        }

        Ok(Self(year))
    }
}
