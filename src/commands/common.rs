//! Common utilities and helper functions shared across commands.
//!
//! Holds the per-invocation context (config, client, caches, output
//! options), player resolution against a roster, and the assembly of
//! forecast inputs from the loaded stats.

use crate::{
    cli::CommonArgs,
    config::{load_config, ModelConfig},
    core::{cache::CacheManager, CacheStatus},
    error::IntelError,
    model::{ForecastInputs, ForecastModel},
    nba::{
        compute::{head_to_head_average, league_average_pace, recent_average},
        http::StatsClient,
        teams::{Team, TEAM_COUNT},
        types::{GameLogEntry, RosterEntry, SeasonAverages, TeamDefense},
    },
    render::Painter,
    Locale, Result, Season, StatCategory,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub config: ModelConfig,
    pub client: StatsClient,
    pub cache: CacheManager,
    pub season: Season,
    pub refresh: bool,
    pub as_json: bool,
    pub locale: Locale,
    pub painter: Painter,
}

impl CommandContext {
    /// Load the model config and build the client and caches from it.
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let config = load_config(common.config.as_deref())?;
        let client = StatsClient::new(config.http.timeout())?.with_debug(common.debug);
        let cache = CacheManager::new(&config.cache);
        Ok(Self::from_parts(config, client, cache, common))
    }

    pub fn from_parts(
        config: ModelConfig,
        client: StatsClient,
        cache: CacheManager,
        common: &CommonArgs,
    ) -> Self {
        Self {
            config,
            client,
            cache,
            season: common.season,
            refresh: common.refresh,
            as_json: common.json,
            locale: common.lang,
            painter: Painter::detect(common.no_color),
        }
    }

    pub fn model(&self) -> ForecastModel {
        ForecastModel::new(self.config.weights, self.config.adjustments)
    }

    /// `✓ <what> loaded (from cache)` style progress line; silent for JSON.
    pub fn report_load(&self, what: &str, status: CacheStatus) {
        if self.as_json {
            return;
        }
        let source = match status {
            CacheStatus::Hit => "from cache",
            CacheStatus::Miss => "cache miss",
            CacheStatus::Refreshed => "refreshed",
        };
        println!("✓ {} loaded ({})", what, source);
    }

    /// `⚠` line for a degraded step. Always logged; printed unless JSON.
    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        if !self.as_json {
            println!("⚠ {}", message);
        }
    }
}

/// Find a player on a roster by id, exact name, or unique name substring.
pub fn resolve_player(roster: &[RosterEntry], query: &str) -> Result<RosterEntry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Err(IntelError::PlayerNotFound {
            name: query.to_string(),
        });
    }

    if let Ok(id) = q.parse::<u64>() {
        if let Some(entry) = roster.iter().find(|p| p.player_id.as_u64() == id) {
            return Ok(entry.clone());
        }
    }

    if let Some(entry) = roster.iter().find(|p| p.name.to_lowercase() == q) {
        return Ok(entry.clone());
    }

    let matches: Vec<&RosterEntry> = roster
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&q))
        .collect();
    match matches.as_slice() {
        [] => Err(IntelError::PlayerNotFound {
            name: query.to_string(),
        }),
        [one] => Ok((*one).clone()),
        many => Err(IntelError::AmbiguousPlayer {
            query: query.to_string(),
            candidates: many
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// The opponent's row in the ranked defence table, if present.
pub fn opponent_defense<'a>(defense: &'a [TeamDefense], opponent: &Team) -> Option<&'a TeamDefense> {
    defense.iter().find(|d| d.team_id == opponent.id)
}

/// Teams in the defence table, or the full league when it is missing.
pub fn league_size(defense: &[TeamDefense]) -> u8 {
    u8::try_from(defense.len())
        .ok()
        .filter(|n| *n >= 2)
        .unwrap_or(TEAM_COUNT)
}

/// Everything the model needs for one category, from whatever data loaded.
/// An empty game log or defence table simply leaves those inputs unset.
pub fn build_inputs(
    stat: StatCategory,
    averages: &SeasonAverages,
    log: &[GameLogEntry],
    recent_games: usize,
    opponent: &Team,
    defense: &[TeamDefense],
    blowout: bool,
) -> ForecastInputs {
    let opp = opponent_defense(defense, opponent);

    ForecastInputs {
        season_avg: averages.line.get(stat),
        recent_avg: recent_average(log, recent_games).map(|l| l.get(stat)),
        head_to_head_avg: head_to_head_average(log, opponent.abbreviation).map(|l| l.get(stat)),
        defense_rank: opp.map(|d| d.rank),
        teams_in_league: league_size(defense),
        opponent_pace: opp.map(|d| d.pace).filter(|p| *p > 0.0),
        league_pace: league_average_pace(defense),
        blowout,
    }
}
