//! Defensive ranking table

use serde::Serialize;

use crate::{
    nba::{cached::load_team_defense, compute::league_average_pace, types::TeamDefense},
    Result, Season,
};

use super::common::CommandContext;

#[derive(Debug, Clone, Serialize)]
pub struct DefenseReport {
    pub season: Season,
    pub league_pace: Option<f64>,
    pub teams: Vec<TeamDefense>,
}

pub async fn fetch_defense(ctx: &CommandContext) -> Result<DefenseReport> {
    let (teams, status) =
        load_team_defense(&ctx.client, &ctx.cache, ctx.season, ctx.refresh).await?;
    ctx.report_load("defensive ratings", status);

    Ok(DefenseReport {
        season: ctx.season,
        league_pace: league_average_pace(&teams),
        teams,
    })
}

pub async fn handle_defense(ctx: &CommandContext) -> Result<()> {
    // tarpaulin::skip - HTTP call, tested via fetch_defense
    let report = fetch_defense(ctx).await?;

    if ctx.as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:<5} {:<24} {:>8} {:>7}", "RANK", "TEAM", "DEF_RTG", "PACE");
    for t in &report.teams {
        println!(
            "{:<5} {:<24} {:>8.1} {:>7.1}",
            t.rank, t.team_name, t.def_rating, t.pace
        );
    }
    if let Some(pace) = report.league_pace {
        println!("League pace: {:.1}", pace);
    }
    Ok(())
}
