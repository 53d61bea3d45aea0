//! Loaders that put the TTL cache in front of the stats API.
//!
//! Each loader returns the value together with where it came from, so the
//! commands can print where each piece of data came from.

use crate::{
    core::{
        cache::{
            CacheManager, DefenseCacheKey, GameLogCacheKey, RosterCacheKey,
            SeasonAveragesCacheKey,
        },
        CacheKey, CacheStatus, UnifiedCache,
    },
    error::IntelError,
    nba::{
        http::StatsClient,
        types::{GameLogEntry, RosterEntry, SeasonAverages, TeamDefense},
    },
    PlayerId, Result, Season, TeamId,
};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

/// Generic read-through: cache hit unless `refresh`, otherwise fetch and store.
async fn read_through<K, V, F, Fut>(
    cache: &UnifiedCache<K, V>,
    key: K,
    refresh: bool,
    fetch: F,
) -> Result<(V, CacheStatus)>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V>>,
{
    if !refresh {
        if let Some(value) = cache.get(&key) {
            tracing::debug!(key = %key.to_file_key(), "cache hit");
            return Ok((value, CacheStatus::Hit));
        }
    }

    let value = fetch().await?;
    cache.put(key, value.clone());

    let status = if refresh {
        CacheStatus::Refreshed
    } else {
        CacheStatus::Miss
    };
    Ok((value, status))
}

pub async fn load_roster(
    client: &StatsClient,
    cache: &CacheManager,
    team: TeamId,
    season: Season,
    refresh: bool,
) -> Result<(Vec<RosterEntry>, CacheStatus)> {
    let key = RosterCacheKey {
        team_id: team,
        season,
    };
    let (roster, status) = read_through(&cache.rosters, key, refresh, || {
        client.team_roster(team, season)
    })
    .await?;

    if roster.is_empty() {
        return Err(IntelError::NoData {
            what: format!("team {} roster in {}", team, season),
        });
    }
    Ok((roster, status))
}

pub async fn load_season_averages(
    client: &StatsClient,
    cache: &CacheManager,
    player: PlayerId,
    season: Season,
    refresh: bool,
) -> Result<(Option<SeasonAverages>, CacheStatus)> {
    let key = SeasonAveragesCacheKey {
        player_id: player,
        season,
    };
    read_through(&cache.season_averages, key, refresh, || {
        client.player_season_averages(player, season)
    })
    .await
}

/// Season averages, falling back once to the previous season when the
/// player has no row for the requested one (e.g. early in a new season or
/// injured all year). Returns the season the numbers belong to.
pub async fn load_season_averages_with_fallback(
    client: &StatsClient,
    cache: &CacheManager,
    player: PlayerId,
    season: Season,
    refresh: bool,
) -> Result<(SeasonAverages, Season)> {
    if let (Some(avg), _) = load_season_averages(client, cache, player, season, refresh).await? {
        return Ok((avg, season));
    }

    let previous = season.previous();
    tracing::warn!(%player, %season, %previous, "no averages for season, trying previous");
    match load_season_averages(client, cache, player, previous, refresh).await? {
        (Some(avg), _) => Ok((avg, previous)),
        (None, _) => Err(IntelError::NoData {
            what: format!("player {} averages in {} or {}", player, season, previous),
        }),
    }
}

pub async fn load_game_log(
    client: &StatsClient,
    cache: &CacheManager,
    player: PlayerId,
    season: Season,
    refresh: bool,
) -> Result<(Vec<GameLogEntry>, CacheStatus)> {
    let key = GameLogCacheKey {
        player_id: player,
        season,
    };
    read_through(&cache.game_logs, key, refresh, || {
        client.player_game_log(player, season)
    })
    .await
}

pub async fn load_team_defense(
    client: &StatsClient,
    cache: &CacheManager,
    season: Season,
    refresh: bool,
) -> Result<(Vec<TeamDefense>, CacheStatus)> {
    let key = DefenseCacheKey { season };
    let (rows, status) =
        read_through(&cache.defenses, key, refresh, || client.team_defense(season)).await?;

    if rows.is_empty() {
        return Err(IntelError::NoData {
            what: format!("defensive ratings in {}", season),
        });
    }
    Ok((rows, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheSettings;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::tempdir;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn averages_body(rows: serde_json::Value) -> serde_json::Value {
        json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["GP", "MIN", "PTS", "AST", "REB", "STL", "BLK"],
                "rowSet": rows
            }]
        })
    }

    #[tokio::test]
    async fn test_roster_second_load_is_cache_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commonteamroster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultSets": [{
                    "name": "CommonTeamRoster",
                    "headers": ["PLAYER", "NUM", "POSITION", "PLAYER_ID"],
                    "rowSet": [["Jayson Tatum", "0", "F", 1628369]]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = CacheManager::with_root(&CacheSettings::default(), dir.path());
        let client = StatsClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
        let team = TeamId::new(1610612738);
        let season = Season::new(2025);

        let (first, status) = load_roster(&client, &cache, team, season, false).await.unwrap();
        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(first[0].name, "Jayson Tatum");

        let (second, status) = load_roster(&client, &cache, team, season, false).await.unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playerdashboardbygeneralsplits"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(averages_body(json!([[10, 30.0, 20.0, 5.0, 5.0, 1.0, 1.0]]))),
            )
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = CacheManager::with_root(&CacheSettings::default(), dir.path());
        let client = StatsClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();

        let player = PlayerId::new(1);
        let season = Season::new(2025);
        load_season_averages(&client, &cache, player, season, false)
            .await
            .unwrap();
        let (_, status) = load_season_averages(&client, &cache, player, season, true)
            .await
            .unwrap();
        assert_eq!(status, CacheStatus::Refreshed);
    }

    #[tokio::test]
    async fn test_season_fallback_to_previous() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playerdashboardbygeneralsplits"))
            .and(query_param("Season", "2025-26"))
            .respond_with(ResponseTemplate::new(200).set_body_json(averages_body(json!([]))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playerdashboardbygeneralsplits"))
            .and(query_param("Season", "2024-25"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(averages_body(json!([[70, 33.0, 18.5, 4.0, 6.0, 1.1, 0.4]]))),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = CacheManager::with_root(&CacheSettings::default(), dir.path());
        let client = StatsClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();

        let (avg, used) = load_season_averages_with_fallback(
            &client,
            &cache,
            PlayerId::new(42),
            Season::new(2025),
            false,
        )
        .await
        .unwrap();

        assert_eq!(used, Season::new(2024));
        assert_eq!(avg.line.pts, 18.5);
    }

    #[tokio::test]
    async fn test_season_fallback_gives_up_after_one_season() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playerdashboardbygeneralsplits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(averages_body(json!([]))))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = CacheManager::with_root(&CacheSettings::default(), dir.path());
        let client = StatsClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();

        let result = load_season_averages_with_fallback(
            &client,
            &cache,
            PlayerId::new(42),
            Season::new(2025),
            false,
        )
        .await;
        assert!(matches!(result, Err(IntelError::NoData { .. })));
    }

    #[tokio::test]
    async fn test_empty_defense_table_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/leaguedashteamstats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultSets": [{
                    "name": "LeagueDashTeamStats",
                    "headers": ["TEAM_ID", "TEAM_NAME", "DEF_RATING", "PACE"],
                    "rowSet": []
                }]
            })))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = CacheManager::with_root(&CacheSettings::default(), dir.path());
        let client = StatsClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();

        let result = load_team_defense(&client, &cache, Season::new(2025), false).await;
        assert!(matches!(result, Err(IntelError::NoData { .. })));
    }
}
