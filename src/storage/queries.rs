//! Basic database query operations

use super::{models::*, schema::ForecastDatabase};
use crate::{model::Verdict, PlayerId, Season, StatCategory};
use anyhow::{anyhow, Result};
use rusqlite::{params, Row};
use std::time::{SystemTime, UNIX_EPOCH};

impl ForecastDatabase {
    /// Append a judged prediction; returns the new row id
    pub fn record_forecast(&mut self, forecast: &NewForecast) -> Result<i64> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        self.record_forecast_at(forecast, now)
    }

    pub fn record_forecast_at(&mut self, forecast: &NewForecast, created_at: u64) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO forecasts
             (player_id, player_name, opponent, season, stat,
              prediction, expectation, verdict, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                forecast.player_id.as_u64(),
                forecast.player_name,
                forecast.opponent,
                forecast.season.start_year(),
                forecast.stat.short_label(),
                forecast.prediction,
                forecast.expectation,
                forecast.verdict.as_str(),
                created_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent forecasts first, optionally filtered by a player-name substring
    pub fn recent_forecasts(
        &self,
        limit: u32,
        player_name: Option<&str>,
    ) -> Result<Vec<ForecastRecord>> {
        let mut query = String::from(
            "SELECT id, player_id, player_name, opponent, season, stat,
                    prediction, expectation, verdict, created_at
             FROM forecasts",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(name) = player_name {
            query.push_str(" WHERE LOWER(player_name) LIKE ?");
            params.push(Box::new(format!("%{}%", name.to_lowercase())));
        }

        query.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
        params.push(Box::new(limit));

        let mut stmt = self.conn.prepare(&query)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt.query_map(&param_refs[..], raw_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row??);
        }
        Ok(records)
    }

    /// Number of forecasts per verdict
    pub fn verdict_counts(&self) -> Result<Vec<(Verdict, u64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT verdict, COUNT(*) FROM forecasts GROUP BY verdict ORDER BY verdict")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (key, count) = row?;
            if let Some(verdict) = Verdict::from_key(&key) {
                counts.push((verdict, count));
            }
        }
        Ok(counts)
    }

    /// Remove every journal entry; returns how many were deleted
    pub fn clear(&mut self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM forecasts", [])?)
    }

    pub fn count(&self) -> Result<u64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM forecasts", [], |row| row.get(0))?)
    }
}

/// Decode a row; text columns that no longer parse are reported, not panicked on.
fn raw_row(row: &Row<'_>) -> rusqlite::Result<Result<ForecastRecord>> {
    let stat: String = row.get(5)?;
    let verdict: String = row.get(8)?;

    let Ok(stat) = stat.parse::<StatCategory>() else {
        return Ok(Err(anyhow!("unknown stat `{}` in journal", stat)));
    };
    let Some(verdict) = Verdict::from_key(&verdict) else {
        return Ok(Err(anyhow!("unknown verdict `{}` in journal", verdict)));
    };

    Ok(Ok(ForecastRecord {
        id: row.get(0)?,
        forecast: NewForecast {
            player_id: PlayerId::new(row.get(1)?),
            player_name: row.get(2)?,
            opponent: row.get(3)?,
            season: Season::new(row.get(4)?),
            stat,
            prediction: row.get(6)?,
            expectation: row.get(7)?,
            verdict,
        },
        created_at: row.get(9)?,
    }))
}
