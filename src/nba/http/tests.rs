//! Unit tests for the stats API client

use super::*;
use crate::error::IntelError;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> StatsClient {
    StatsClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap()
}

fn roster_response() -> serde_json::Value {
    json!({
        "resource": "commonteamroster",
        "resultSets": [
            {
                "name": "CommonTeamRoster",
                "headers": ["TeamID", "SEASON", "PLAYER", "NUM", "POSITION", "PLAYER_ID"],
                "rowSet": [
                    [1610612747, "2025", "LeBron James", "23", "F", 2544],
                    [1610612747, "2025", "Luka Doncic", "77", "G", 1629029]
                ]
            },
            {"name": "Coaches", "headers": ["COACH_NAME"], "rowSet": [["JJ Redick"]]}
        ]
    })
}

#[test]
fn test_stats_base_url_constant() {
    assert_eq!(STATS_BASE_URL, "https://stats.nba.com/stats");
}

#[test]
fn test_stats_headers() {
    let headers = stats_headers().unwrap();
    assert_eq!(headers.get("referer").unwrap(), "https://www.nba.com/");
    assert_eq!(headers.get("origin").unwrap(), "https://www.nba.com");
    assert_eq!(headers.get("x-nba-stats-origin").unwrap(), "stats");
    assert_eq!(headers.get("x-nba-stats-token").unwrap(), "true");
    assert!(headers.contains_key("user-agent"));
}

#[test]
fn test_dashboard_params_include_every_filter() {
    let params = dashboard_params(Season::new(2025));
    let get = |k: &str| {
        params
            .iter()
            .find(|(key, _)| *key == k)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("Season"), Some("2025-26"));
    assert_eq!(get("PerMode"), Some("PerGame"));
    assert_eq!(get("MeasureType"), Some("Base"));
    assert_eq!(get("DateFrom"), Some(""));
    assert_eq!(get("OpponentTeamID"), Some("0"));
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let client = StatsClient::with_base_url("http://localhost:1234/", Duration::from_secs(1)).unwrap();
    assert_eq!(client.base_url(), "http://localhost:1234");
}

#[tokio::test]
async fn test_team_roster_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commonteamroster"))
        .and(query_param("TeamID", "1610612747"))
        .and(query_param("Season", "2025-26"))
        .and(header("x-nba-stats-token", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_response()))
        .mount(&server)
        .await;

    let roster = client(&server)
        .team_roster(TeamId::new(1610612747), Season::new(2025))
        .await
        .unwrap();

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[1].name, "Luka Doncic");
    assert_eq!(roster[1].player_id, PlayerId::new(1629029));
}

#[tokio::test]
async fn test_player_season_averages_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playerdashboardbygeneralsplits"))
        .and(query_param("PlayerID", "2544"))
        .and(query_param("PerMode", "PerGame"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["GROUP_SET", "GP", "MIN", "PTS", "AST", "REB", "STL", "BLK"],
                "rowSet": [["Overall", 40, 35.1, 24.4, 8.2, 7.8, 1.2, 0.6]]
            }]
        })))
        .mount(&server)
        .await;

    let avg = client(&server)
        .player_season_averages(PlayerId::new(2544), Season::new(2025))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(avg.games_played, 40);
    assert_eq!(avg.line.pts, 24.4);
    assert_eq!(avg.line.reb, 7.8);
}

#[tokio::test]
async fn test_player_season_averages_no_games() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playerdashboardbygeneralsplits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["GP", "MIN", "PTS", "AST", "REB", "STL", "BLK"],
                "rowSet": []
            }]
        })))
        .mount(&server)
        .await;

    let avg = client(&server)
        .player_season_averages(PlayerId::new(1), Season::new(2025))
        .await
        .unwrap();
    assert!(avg.is_none());
}

#[tokio::test]
async fn test_player_game_log_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playergamelog"))
        .and(query_param("SeasonType", "Regular Season"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultSets": [{
                "name": "PlayerGameLog",
                "headers": ["Game_ID", "GAME_DATE", "MATCHUP", "MIN", "PTS", "AST", "REB", "STL", "BLK"],
                "rowSet": [
                    ["0022500200", "DEC 01, 2025", "LAL vs. BOS", 37, 28, 9, 6, 1, 1],
                    ["0022500190", "NOV 29, 2025", "LAL @ DAL", 35, 19, 11, 9, 2, 0]
                ]
            }]
        })))
        .mount(&server)
        .await;

    let log = client(&server)
        .player_game_log(PlayerId::new(2544), Season::new(2025))
        .await
        .unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log[0].opponent_abbreviation(), Some("BOS"));
    assert_eq!(log[1].line.ast, 11.0);
}

#[tokio::test]
async fn test_team_defense_is_ranked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leaguedashteamstats"))
        .and(query_param("MeasureType", "Advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultSets": [{
                "name": "LeagueDashTeamStats",
                "headers": ["TEAM_ID", "TEAM_NAME", "DEF_RATING", "PACE"],
                "rowSet": [
                    [1610612764, "Washington Wizards", 120.1, 101.0],
                    [1610612760, "Oklahoma City Thunder", 104.8, 99.5],
                    [1610612738, "Boston Celtics", 110.3, 96.2]
                ]
            }]
        })))
        .mount(&server)
        .await;

    let defenses = client(&server)
        .team_defense(Season::new(2025))
        .await
        .unwrap();

    assert_eq!(defenses[0].team_name, "Oklahoma City Thunder");
    assert_eq!(defenses[0].rank, 1);
    assert_eq!(defenses[2].team_name, "Washington Wizards");
    assert_eq!(defenses[2].rank, 3);
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client(&server)
        .team_roster(TeamId::new(1610612747), Season::new(2025))
        .await;
    assert!(matches!(result, Err(IntelError::Http(_))));
}

#[tokio::test]
async fn test_invalid_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&server)
        .await;

    let result = client(&server)
        .team_defense(Season::new(2025))
        .await;
    // reqwest reports body decode failures as its own error type
    assert!(matches!(result, Err(IntelError::Http(_))));
}

#[tokio::test]
async fn test_missing_result_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultSets": [{"name": "Something", "headers": [], "rowSet": []}]
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .player_game_log(PlayerId::new(1), Season::new(2025))
        .await;
    assert!(matches!(result, Err(IntelError::NoData { .. })));
}
