//! Season and recent-form averages for one player

use serde::Serialize;

use crate::{
    nba::{
        cached::{load_game_log, load_roster, load_season_averages_with_fallback},
        compute::{recent_average, stat_series},
        teams::find_team,
        types::{RosterEntry, SeasonAverages, StatLine},
    },
    render::sparkline,
    Result, Season, StatCategory,
};

use super::common::{resolve_player, CommandContext};

#[derive(Debug, Clone, Serialize)]
pub struct AveragesReport {
    pub player: RosterEntry,
    pub team: String,
    /// Season the averages belong to; the previous one after a fallback.
    pub season: Season,
    pub averages: SeasonAverages,
    pub recent_games: usize,
    pub recent: Option<StatLine>,
    /// Points over the recent games, oldest first.
    pub recent_points: Vec<f64>,
}

pub async fn fetch_averages(
    ctx: &CommandContext,
    team_query: &str,
    player_query: &str,
    last_n: Option<usize>,
) -> Result<AveragesReport> {
    let team = find_team(team_query)?;
    let (roster, status) =
        load_roster(&ctx.client, &ctx.cache, team.id, ctx.season, ctx.refresh).await?;
    ctx.report_load(&format!("{} roster", team.abbreviation), status);
    let player = resolve_player(&roster, player_query)?;

    let (averages, season) = load_season_averages_with_fallback(
        &ctx.client,
        &ctx.cache,
        player.player_id,
        ctx.season,
        ctx.refresh,
    )
    .await?;
    if season != ctx.season {
        ctx.warn(&format!(
            "No {} averages for {}; showing {}",
            ctx.season, player.name, season
        ));
    }

    let recent_games = last_n.unwrap_or(ctx.config.recent_games).max(1);
    let log = match load_game_log(&ctx.client, &ctx.cache, player.player_id, season, ctx.refresh)
        .await
    {
        Ok((log, status)) => {
            ctx.report_load("game log", status);
            log
        }
        Err(e) => {
            ctx.warn(&format!("Could not load game log: {}", e));
            Vec::new()
        }
    };

    Ok(AveragesReport {
        team: team.full_name.to_string(),
        season,
        recent: recent_average(&log, recent_games),
        recent_points: stat_series(&log, StatCategory::Points, recent_games),
        averages,
        recent_games,
        player,
    })
}

pub async fn handle_averages(
    ctx: &CommandContext,
    team_query: &str,
    player_query: &str,
    last_n: Option<usize>,
) -> Result<()> {
    // tarpaulin::skip - HTTP call, tested via fetch_averages
    let report = fetch_averages(ctx, team_query, player_query, last_n).await?;

    if ctx.as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} ({}) {} | {} GP, {:.1} MIN",
        report.player.name,
        report.team,
        report.season,
        report.averages.games_played,
        report.averages.minutes
    );
    let recent_header = format!("LAST {}", report.recent_games);
    println!("{:<10} {:>8} {:>8}", "STAT", "SEASON", recent_header);
    for stat in StatCategory::ALL {
        let recent = report
            .recent
            .map(|l| format!("{:.1}", l.get(stat)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:>8.1} {:>8}",
            stat.to_string(),
            report.averages.line.get(stat),
            recent
        );
    }
    if !report.recent_points.is_empty() {
        println!("PTS trend  {}", sparkline(&report.recent_points));
    }
    Ok(())
}
