//! Team roster listing

use serde::Serialize;

use crate::{
    nba::{cached::load_roster, teams::find_team, teams::Team, types::RosterEntry},
    Result, Season,
};

use super::common::CommandContext;

#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    pub team: Team,
    pub season: Season,
    pub players: Vec<RosterEntry>,
}

pub async fn fetch_roster(ctx: &CommandContext, team_query: &str) -> Result<RosterReport> {
    let team = find_team(team_query)?;
    let (players, status) =
        load_roster(&ctx.client, &ctx.cache, team.id, ctx.season, ctx.refresh).await?;
    ctx.report_load(&format!("{} roster", team.abbreviation), status);

    Ok(RosterReport {
        team,
        season: ctx.season,
        players,
    })
}

pub async fn handle_roster(ctx: &CommandContext, team_query: &str) -> Result<()> {
    // tarpaulin::skip - HTTP call, tested via fetch_roster
    let report = fetch_roster(ctx, team_query).await?;

    if ctx.as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({})", report.team.full_name, report.season);
    println!("{:<12} {:<24} {:<4} {}", "PLAYER_ID", "NAME", "NUM", "POS");
    for p in &report.players {
        println!(
            "{:<12} {:<24} {:<4} {}",
            p.player_id,
            p.name,
            p.number.as_deref().unwrap_or("-"),
            p.position.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
