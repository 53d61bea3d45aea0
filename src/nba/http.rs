//! HTTP client for the NBA stats API (`stats.nba.com/stats`).
//!
//! The service rejects requests that do not look like they come from the
//! nba.com site, so every request carries browser-style headers.

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT},
    Client,
};
use std::time::Duration;

use crate::{
    nba::{
        compute::rank_defenses,
        types::{GameLogEntry, RosterEntry, SeasonAverages, StatsResponse, TeamDefense},
    },
    PlayerId, Result, Season, TeamId, BASE_URL_ENV_VAR,
};

#[cfg(test)]
mod tests;

/// Base path for the NBA stats API.
pub const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

const SEASON_TYPE: &str = "Regular Season";
const LEAGUE_ID: &str = "00";

/// Headers the stats API expects on every request.
pub fn stats_headers() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    h.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    h.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    h.insert(
        HeaderName::from_static("x-nba-stats-origin"),
        HeaderValue::from_str("stats")?,
    );
    h.insert(
        HeaderName::from_static("x-nba-stats-token"),
        HeaderValue::from_str("true")?,
    );
    Ok(h)
}

/// Thin client over the four endpoints the forecast needs.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: Client,
    base_url: String,
    debug: bool,
}

impl StatsClient {
    /// Client against `NBA_STATS_BASE_URL`, or the public API when unset.
    pub fn new(timeout: Duration) -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| STATS_BASE_URL.to_string());
        Self::with_base_url(base_url, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .default_headers(stats_headers()?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            debug: false,
        })
    }

    /// Print each request URL to stderr.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<StatsResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let request = self.http.get(&url).query(params).build()?;

        if self.debug {
            eprintln!("URL => {}", request.url());
        }
        tracing::debug!(url = %request.url(), "stats API request");

        let response = self
            .http
            .execute(request)
            .await?
            .error_for_status()?
            .json::<StatsResponse>()
            .await?;
        Ok(response)
    }

    /// `commonteamroster`: players on a team for a season.
    pub async fn team_roster(&self, team: TeamId, season: Season) -> Result<Vec<RosterEntry>> {
        let params = [
            ("TeamID", team.to_string()),
            ("Season", season.to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
        ];
        let response = self.get("commonteamroster", &params).await?;
        RosterEntry::from_result_set(response.result_set("CommonTeamRoster")?)
    }

    /// `playerdashboardbygeneralsplits`: per-game averages over the season.
    /// `Ok(None)` when the player has no games in that season.
    pub async fn player_season_averages(
        &self,
        player: PlayerId,
        season: Season,
    ) -> Result<Option<SeasonAverages>> {
        let mut params = dashboard_params(season);
        params.push(("PlayerID", player.to_string()));
        let response = self
            .get("playerdashboardbygeneralsplits", &params)
            .await?;
        SeasonAverages::from_result_set(response.result_set("OverallPlayerDashboard")?)
    }

    /// `playergamelog`: one row per game, newest first.
    pub async fn player_game_log(
        &self,
        player: PlayerId,
        season: Season,
    ) -> Result<Vec<GameLogEntry>> {
        let params = [
            ("PlayerID", player.to_string()),
            ("Season", season.to_string()),
            ("SeasonType", SEASON_TYPE.to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
        ];
        let response = self.get("playergamelog", &params).await?;
        GameLogEntry::from_result_set(response.result_set("PlayerGameLog")?)
    }

    /// `leaguedashteamstats` (Advanced): defensive rating and pace, ranked.
    pub async fn team_defense(&self, season: Season) -> Result<Vec<TeamDefense>> {
        let mut params = dashboard_params(season);
        for (k, v) in [
            ("Conference", ""),
            ("Division", ""),
            ("GameScope", ""),
            ("PlayerExperience", ""),
            ("PlayerPosition", ""),
            ("StarterBench", ""),
            ("TeamID", "0"),
            ("TwoWay", "0"),
        ] {
            params.push((k, v.to_string()));
        }
        if let Some(measure) = params.iter_mut().find(|(k, _)| *k == "MeasureType") {
            measure.1 = "Advanced".to_string();
        }

        let response = self.get("leaguedashteamstats", &params).await?;
        let rows = TeamDefense::from_result_set(response.result_set("LeagueDashTeamStats")?)?;
        Ok(rank_defenses(rows))
    }
}

/// The dashboard endpoints reject requests unless every filter is present,
/// even when empty.
fn dashboard_params(season: Season) -> Vec<(&'static str, String)> {
    let fixed = [
        ("MeasureType", "Base"),
        ("PerMode", "PerGame"),
        ("SeasonType", SEASON_TYPE),
        ("LeagueID", LEAGUE_ID),
        ("PlusMinus", "N"),
        ("PaceAdjust", "N"),
        ("Rank", "N"),
        ("LastNGames", "0"),
        ("Month", "0"),
        ("OpponentTeamID", "0"),
        ("Period", "0"),
        ("PORound", "0"),
        ("DateFrom", ""),
        ("DateTo", ""),
        ("GameSegment", ""),
        ("Location", ""),
        ("Outcome", ""),
        ("SeasonSegment", ""),
        ("ShotClockRange", ""),
        ("VsConference", ""),
        ("VsDivision", ""),
    ];
    let mut params: Vec<(&'static str, String)> =
        fixed.iter().map(|(k, v)| (*k, v.to_string())).collect();
    params.push(("Season", season.to_string()));
    params
}
