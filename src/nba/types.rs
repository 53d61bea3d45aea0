use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::IntelError, PlayerId, Result, StatCategory, TeamId};


/// One tabular block of a stats API response.
///
/// Every endpoint answers with `headers` plus positional `rowSet` arrays;
/// decoders look columns up by header name rather than by position.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ResultSets {
    Many(Vec<ResultSet>),
    One(ResultSet),
}

/// Top-level envelope. Most endpoints use `resultSets` (array); a few use
/// a single `resultSet` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", alias = "resultSet")]
    sets: ResultSets,
}

impl StatsResponse {
    pub fn result_sets(&self) -> &[ResultSet] {
        match &self.sets {
            ResultSets::Many(sets) => sets,
            ResultSets::One(set) => std::slice::from_ref(set),
        }
    }

    /// Find a result set by name (case-insensitive).
    pub fn result_set(&self, name: &str) -> Result<&ResultSet> {
        self.result_sets()
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| IntelError::NoData {
                what: format!("result set {}", name),
            })
    }
}

impl ResultSet {
    /// Index of a column. Header casing varies between endpoints
    /// (`Game_ID` vs `GAME_ID`), so the match ignores case.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| IntelError::MissingColumn {
                set: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.row_set.iter().map(move |cells| Row { set: self, cells })
    }

    pub fn is_empty(&self) -> bool {
        self.row_set.is_empty()
    }
}

static NULL: Value = Value::Null;

/// Borrowed view over one row with typed, by-name accessors.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    set: &'a ResultSet,
    cells: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn value(&self, column: &str) -> Result<&'a Value> {
        let idx = self.set.column(column)?;
        Ok(self.cells.get(idx).unwrap_or(&NULL))
    }

    /// Numeric cell; `null` reads as 0 (the API uses it for "did not record").
    pub fn f64(&self, column: &str) -> Result<f64> {
        let v = self.value(column)?;
        Ok(match v {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    pub fn u64(&self, column: &str) -> Result<u64> {
        let v = self.value(column)?;
        match v {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .ok_or_else(|| self.bad_cell(column)),
            Value::String(s) => s.trim().parse().map_err(|_| self.bad_cell(column)),
            _ => Err(self.bad_cell(column)),
        }
    }

    /// Text cell; numbers are rendered, `null` becomes an empty string.
    pub fn string(&self, column: &str) -> Result<String> {
        let v = self.value(column)?;
        Ok(match v {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Minutes come either as a number or as `"mm:ss"`.
    pub fn minutes(&self, column: &str) -> Result<f64> {
        let v = self.value(column)?;
        Ok(match v {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => parse_minutes(s),
            _ => 0.0,
        })
    }

    fn bad_cell(&self, column: &str) -> IntelError {
        IntelError::MissingColumn {
            set: self.set.name.clone(),
            column: format!("{} (unreadable value)", column),
        }
    }
}

fn parse_minutes(s: &str) -> f64 {
    let s = s.trim();
    match s.split_once(':') {
        Some((m, sec)) => {
            let m: f64 = m.parse().unwrap_or(0.0);
            let sec: f64 = sec.parse().unwrap_or(0.0);
            m + sec / 60.0
        }
        None => s.parse().unwrap_or(0.0),
    }
}

/// Per-game counting stats for the five forecast categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct StatLine {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
}

impl StatLine {
    pub fn get(&self, stat: StatCategory) -> f64 {
        match stat {
            StatCategory::Points => self.pts,
            StatCategory::Assists => self.ast,
            StatCategory::Rebounds => self.reb,
            StatCategory::Steals => self.stl,
            StatCategory::Blocks => self.blk,
        }
    }

    pub fn set(&mut self, stat: StatCategory, value: f64) {
        match stat {
            StatCategory::Points => self.pts = value,
            StatCategory::Assists => self.ast = value,
            StatCategory::Rebounds => self.reb = value,
            StatCategory::Steals => self.stl = value,
            StatCategory::Blocks => self.blk = value,
        }
    }

    pub fn from_row(row: &Row<'_>) -> Result<Self> {
        let mut line = StatLine::default();
        for stat in StatCategory::ALL {
            line.set(stat, row.f64(stat.short_label())?);
        }
        Ok(line)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub number: Option<String>,
    pub position: Option<String>,
}

impl RosterEntry {
    pub fn from_result_set(set: &ResultSet) -> Result<Vec<Self>> {
        set.rows()
            .map(|row| {
                let number = row.string("NUM")?;
                let position = row.string("POSITION")?;
                Ok(RosterEntry {
                    player_id: PlayerId::new(row.u64("PLAYER_ID")?),
                    name: row.string("PLAYER")?,
                    number: (!number.is_empty()).then_some(number),
                    position: (!position.is_empty()).then_some(position),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeasonAverages {
    pub games_played: u32,
    pub minutes: f64,
    pub line: StatLine,
}

impl SeasonAverages {
    /// The overall dashboard has one row; an empty set means the player
    /// has not appeared in that season.
    pub fn from_result_set(set: &ResultSet) -> Result<Option<Self>> {
        let Some(row) = set.rows().next() else {
            return Ok(None);
        };
        Ok(Some(SeasonAverages {
            games_played: row.u64("GP")? as u32,
            minutes: row.minutes("MIN")?,
            line: StatLine::from_row(&row)?,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameLogEntry {
    pub game_id: String,
    pub game_date: String,
    pub matchup: String,
    pub minutes: f64,
    pub line: StatLine,
}

impl GameLogEntry {
    pub fn from_result_set(set: &ResultSet) -> Result<Vec<Self>> {
        set.rows()
            .map(|row| {
                Ok(GameLogEntry {
                    game_id: row.string("GAME_ID")?,
                    game_date: row.string("GAME_DATE")?,
                    matchup: row.string("MATCHUP")?,
                    minutes: row.minutes("MIN")?,
                    line: StatLine::from_row(&row)?,
                })
            })
            .collect()
    }

    /// Opponent abbreviation from `"LAL vs. BOS"` (home) or `"LAL @ BOS"` (away).
    pub fn opponent_abbreviation(&self) -> Option<&str> {
        let (_, rest) = self
            .matchup
            .split_once(" vs. ")
            .or_else(|| self.matchup.split_once(" @ "))?;
        let abbr = rest.trim();
        (!abbr.is_empty()).then_some(abbr)
    }

    pub fn is_home(&self) -> bool {
        self.matchup.contains(" vs. ")
    }
}

/// A team's defensive efficiency and pace; `rank` is 1 for the best defence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamDefense {
    pub team_id: TeamId,
    pub team_name: String,
    pub def_rating: f64,
    pub pace: f64,
    pub rank: u8,
}

impl TeamDefense {
    /// Rows come unranked; see `compute::rank_defenses`.
    pub fn from_result_set(set: &ResultSet) -> Result<Vec<Self>> {
        set.rows()
            .map(|row| {
                Ok(TeamDefense {
                    team_id: TeamId::new(row.u64("TEAM_ID")? as u32),
                    team_name: row.string("TEAM_NAME")?,
                    def_rating: row.f64("DEF_RATING")?,
                    pace: row.f64("PACE")?,
                    rank: 0,
                })
            })
            .collect()
    }
}
