//! Forecast journal on disk

use nba_intel::{model::Verdict, storage::*, PlayerId, Season, StatCategory};
use tempfile::tempdir;

fn forecast(stat: StatCategory, verdict: Verdict) -> NewForecast {
    NewForecast {
        player_id: PlayerId::new(203999),
        player_name: "Nikola Jokic".to_string(),
        opponent: "LAL".to_string(),
        season: Season::new(2025),
        stat,
        prediction: 12.0,
        expectation: 11.0,
        verdict,
    }
}

#[test]
fn test_journal_persists_across_connections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("forecasts.db");

    {
        let mut db = ForecastDatabase::open(&path).unwrap();
        db.record_forecast(&forecast(StatCategory::Assists, Verdict::Likely))
            .unwrap();
        db.record_forecast(&forecast(StatCategory::Rebounds, Verdict::Uncertain))
            .unwrap();
    }

    let db = ForecastDatabase::open(&path).unwrap();
    assert_eq!(db.count().unwrap(), 2);

    let records = db.recent_forecasts(10, Some("jokic")).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .any(|r| r.forecast.stat == StatCategory::Rebounds
            && r.forecast.verdict == Verdict::Uncertain));
}

#[test]
fn test_clear_empties_journal() {
    let dir = tempdir().unwrap();
    let mut db = ForecastDatabase::open(&dir.path().join("j.db")).unwrap();
    db.record_forecast(&forecast(StatCategory::Points, Verdict::Unlikely))
        .unwrap();

    assert_eq!(db.clear().unwrap(), 1);
    assert_eq!(db.count().unwrap(), 0);
    assert!(db.recent_forecasts(5, None).unwrap().is_empty());
}

#[test]
fn test_record_serializes_flat() {
    let mut db = ForecastDatabase::new_in_memory().unwrap();
    db.record_forecast_at(&forecast(StatCategory::Blocks, Verdict::Likely), 42)
        .unwrap();
    let record = &db.recent_forecasts(1, None).unwrap()[0];

    let value = serde_json::to_value(record).unwrap();
    assert_eq!(value["player_name"], "Nikola Jokic");
    assert_eq!(value["verdict"], "likely");
    assert_eq!(value["created_at"], 42);
}
