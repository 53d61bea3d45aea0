//! Roster board: expected points for every player against one opponent.

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    model::{matchup_difficulty, ForecastModel, Verdict},
    nba::{
        cached::{load_game_log, load_roster, load_season_averages, load_team_defense},
        teams::{find_team, Team},
        types::{GameLogEntry, RosterEntry, SeasonAverages, TeamDefense},
    },
    Result, Season, StatCategory,
};

use super::common::{build_inputs, opponent_defense, CommandContext};

/// A roster player with the stats loaded for them.
#[derive(Debug, Clone)]
pub struct PlayerStats {
    pub player: RosterEntry,
    pub averages: SeasonAverages,
    pub log: Vec<GameLogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlookRow {
    pub player: RosterEntry,
    pub games_played: u32,
    pub season_points: f64,
    pub recent_points: Option<f64>,
    pub expected_points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlookReport {
    pub team: Team,
    pub opponent: Team,
    pub season: Season,
    pub defense_rank: Option<u8>,
    pub matchup: Option<Verdict>,
    pub rows: Vec<OutlookRow>,
    /// Players skipped because they have no averages this season.
    pub skipped: Vec<String>,
}

/// Forecast points for every player in parallel, highest expectation first.
pub fn rank_outlook(
    players: &[PlayerStats],
    opponent: &Team,
    defense: &[TeamDefense],
    model: &ForecastModel,
    recent_games: usize,
) -> Vec<OutlookRow> {
    let mut rows: Vec<OutlookRow> = players
        .par_iter()
        .map(|p| {
            let inputs = build_inputs(
                StatCategory::Points,
                &p.averages,
                &p.log,
                recent_games,
                opponent,
                defense,
                false,
            );
            OutlookRow {
                player: p.player.clone(),
                games_played: p.averages.games_played,
                season_points: inputs.season_avg,
                recent_points: inputs.recent_avg,
                expected_points: model.forecast(&inputs).expectation,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.expected_points.total_cmp(&a.expected_points));
    rows
}

pub async fn outlook_report(
    ctx: &CommandContext,
    team_query: &str,
    opponent_query: &str,
    top: Option<usize>,
) -> Result<OutlookReport> {
    let team = find_team(team_query)?;
    let opponent = find_team(opponent_query)?;

    let (roster, status) =
        load_roster(&ctx.client, &ctx.cache, team.id, ctx.season, ctx.refresh).await?;
    ctx.report_load(&format!("{} roster", team.abbreviation), status);

    let defense = match load_team_defense(&ctx.client, &ctx.cache, ctx.season, ctx.refresh).await {
        Ok((rows, _)) => rows,
        Err(e) => {
            ctx.warn(&format!("Could not load defensive ratings: {}", e));
            Vec::new()
        }
    };

    let mut players = Vec::with_capacity(roster.len());
    let mut skipped = Vec::new();
    for entry in roster {
        let averages = match load_season_averages(
            &ctx.client,
            &ctx.cache,
            entry.player_id,
            ctx.season,
            ctx.refresh,
        )
        .await
        {
            Ok((Some(avg), _)) => avg,
            Ok((None, _)) => {
                skipped.push(entry.name);
                continue;
            }
            Err(e) => {
                ctx.warn(&format!("Could not load averages for {}: {}", entry.name, e));
                skipped.push(entry.name);
                continue;
            }
        };
        let log = load_game_log(
            &ctx.client,
            &ctx.cache,
            entry.player_id,
            ctx.season,
            ctx.refresh,
        )
        .await
        .map(|(log, _)| log)
        .unwrap_or_else(|e| {
            tracing::warn!(player = %entry.name, error = %e, "game log unavailable");
            Vec::new()
        });
        players.push(PlayerStats {
            player: entry,
            averages,
            log,
        });
    }

    let mut rows = rank_outlook(
        &players,
        &opponent,
        &defense,
        &ctx.model(),
        ctx.config.recent_games,
    );
    if let Some(n) = top {
        rows.truncate(n);
    }

    let defense_rank = opponent_defense(&defense, &opponent).map(|d| d.rank);
    Ok(OutlookReport {
        team,
        opponent,
        season: ctx.season,
        defense_rank,
        matchup: defense_rank.map(matchup_difficulty),
        rows,
        skipped,
    })
}

pub async fn handle_outlook(
    ctx: &CommandContext,
    team_query: &str,
    opponent_query: &str,
    top: Option<usize>,
) -> Result<()> {
    // tarpaulin::skip - HTTP calls, tested via outlook_report
    let report = outlook_report(ctx, team_query, opponent_query, top).await?;

    if ctx.as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} vs {} ({})",
        report.team.full_name, report.opponent.full_name, report.season
    );
    if let (Some(rank), Some(matchup)) = (report.defense_rank, report.matchup) {
        println!(
            "Opponent defence rank {}: {} {}",
            rank,
            matchup.mark(),
            matchup.label(ctx.locale)
        );
    }
    println!(
        "{:<24} {:>4} {:>7} {:>7} {:>9}",
        "PLAYER", "GP", "SEASON", "RECENT", "EXPECTED"
    );
    for row in &report.rows {
        let recent = row
            .recent_points
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:>4} {:>7.1} {:>7} {:>9.1}",
            row.player.name, row.games_played, row.season_points, recent, row.expected_points
        );
    }
    if !report.skipped.is_empty() {
        println!("No averages: {}", report.skipped.join(", "));
    }
    Ok(())
}
