//! Team directory listing

use crate::{nba::teams::all_teams, Result};

pub fn handle_teams(as_json: bool) -> Result<()> {
    let teams = all_teams();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&teams)?);
        return Ok(());
    }

    println!("{:<12} {:<4} {:<24} {}", "ID", "ABBR", "TEAM", "CITY");
    for team in &teams {
        println!(
            "{:<12} {:<4} {:<24} {}",
            team.id, team.abbreviation, team.full_name, team.city
        );
    }
    Ok(())
}
