//! Journal of past predictions

use serde::Serialize;

use crate::{
    model::Verdict,
    render::{verdict_tone, Painter},
    storage::{ForecastDatabase, ForecastRecord},
    Locale, Result,
};

#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    pub total: u64,
    pub verdicts: Vec<(Verdict, u64)>,
    pub entries: Vec<ForecastRecord>,
}

pub fn history_report(
    db: &ForecastDatabase,
    player: Option<&str>,
    limit: usize,
) -> Result<HistoryReport> {
    let limit = u32::try_from(limit).unwrap_or(u32::MAX);
    Ok(HistoryReport {
        total: db.count()?,
        verdicts: db.verdict_counts()?,
        entries: db.recent_forecasts(limit, player)?,
    })
}

pub fn handle_history(
    player: Option<&str>,
    limit: usize,
    clear: bool,
    as_json: bool,
    locale: Locale,
    painter: &Painter,
) -> Result<()> {
    let mut db = ForecastDatabase::new()?;

    if clear {
        let removed = db.clear()?;
        if as_json {
            println!("{}", serde_json::json!({ "cleared": removed }));
        } else {
            println!("✓ Cleared {} journal entries", removed);
        }
        return Ok(());
    }

    let report = history_report(&db, player, limit)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.entries.is_empty() {
        println!("No predictions recorded yet.");
        return Ok(());
    }

    println!(
        "{:<5} {:<22} {:<4} {:<8} {:<9} {:>6} {:>8}  {}",
        "ID", "PLAYER", "OPP", "SEASON", "STAT", "PICK", "EXPECTED", "VERDICT"
    );
    for r in &report.entries {
        let f = &r.forecast;
        let verdict = format!("{} {}", f.verdict.mark(), f.verdict.label(locale));
        println!(
            "{:<5} {:<22} {:<4} {:<8} {:<9} {:>6.1} {:>8.1}  {}",
            r.id,
            f.player_name,
            f.opponent,
            f.season,
            f.stat.to_string(),
            f.prediction,
            f.expectation,
            painter.paint(&verdict, verdict_tone(f.verdict))
        );
    }

    let summary: Vec<String> = report
        .verdicts
        .iter()
        .map(|(v, n)| format!("{} {}", v.label(locale), n))
        .collect();
    println!("{} total | {}", report.total, summary.join(" | "));
    Ok(())
}
