//! Static directory of NBA franchises.
//!
//! Team ids are the stats API's own ids, so the directory can be used
//! without a network round trip.

use serde::Serialize;

use crate::{error::IntelError, Result, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub full_name: &'static str,
    pub abbreviation: &'static str,
    pub nickname: &'static str,
    pub city: &'static str,
}

const fn team(
    id: u32,
    full_name: &'static str,
    abbreviation: &'static str,
    nickname: &'static str,
    city: &'static str,
) -> Team {
    Team {
        id: TeamId(id),
        full_name,
        abbreviation,
        nickname,
        city,
    }
}

static TEAMS: [Team; 30] = [
    team(1610612737, "Atlanta Hawks", "ATL", "Hawks", "Atlanta"),
    team(1610612738, "Boston Celtics", "BOS", "Celtics", "Boston"),
    team(1610612739, "Cleveland Cavaliers", "CLE", "Cavaliers", "Cleveland"),
    team(1610612740, "New Orleans Pelicans", "NOP", "Pelicans", "New Orleans"),
    team(1610612741, "Chicago Bulls", "CHI", "Bulls", "Chicago"),
    team(1610612742, "Dallas Mavericks", "DAL", "Mavericks", "Dallas"),
    team(1610612743, "Denver Nuggets", "DEN", "Nuggets", "Denver"),
    team(1610612744, "Golden State Warriors", "GSW", "Warriors", "Golden State"),
    team(1610612745, "Houston Rockets", "HOU", "Rockets", "Houston"),
    team(1610612746, "Los Angeles Clippers", "LAC", "Clippers", "Los Angeles"),
    team(1610612747, "Los Angeles Lakers", "LAL", "Lakers", "Los Angeles"),
    team(1610612748, "Miami Heat", "MIA", "Heat", "Miami"),
    team(1610612749, "Milwaukee Bucks", "MIL", "Bucks", "Milwaukee"),
    team(1610612750, "Minnesota Timberwolves", "MIN", "Timberwolves", "Minnesota"),
    team(1610612751, "Brooklyn Nets", "BKN", "Nets", "Brooklyn"),
    team(1610612752, "New York Knicks", "NYK", "Knicks", "New York"),
    team(1610612753, "Orlando Magic", "ORL", "Magic", "Orlando"),
    team(1610612754, "Indiana Pacers", "IND", "Pacers", "Indiana"),
    team(1610612755, "Philadelphia 76ers", "PHI", "76ers", "Philadelphia"),
    team(1610612756, "Phoenix Suns", "PHX", "Suns", "Phoenix"),
    team(1610612757, "Portland Trail Blazers", "POR", "Trail Blazers", "Portland"),
    team(1610612758, "Sacramento Kings", "SAC", "Kings", "Sacramento"),
    team(1610612759, "San Antonio Spurs", "SAS", "Spurs", "San Antonio"),
    team(1610612760, "Oklahoma City Thunder", "OKC", "Thunder", "Oklahoma City"),
    team(1610612761, "Toronto Raptors", "TOR", "Raptors", "Toronto"),
    team(1610612762, "Utah Jazz", "UTA", "Jazz", "Utah"),
    team(1610612763, "Memphis Grizzlies", "MEM", "Grizzlies", "Memphis"),
    team(1610612764, "Washington Wizards", "WAS", "Wizards", "Washington"),
    team(1610612765, "Detroit Pistons", "DET", "Pistons", "Detroit"),
    team(1610612766, "Charlotte Hornets", "CHA", "Hornets", "Charlotte"),
];

/// Number of franchises, i.e. the worst possible defensive rank.
pub const TEAM_COUNT: u8 = 30;

/// All teams sorted by full name.
pub fn all_teams() -> Vec<Team> {
    let mut teams = TEAMS.to_vec();
    teams.sort_by(|a, b| a.full_name.cmp(b.full_name));
    teams
}

pub fn team_by_id(id: TeamId) -> Option<Team> {
    TEAMS.iter().copied().find(|t| t.id == id)
}

pub fn team_by_abbreviation(abbr: &str) -> Option<Team> {
    TEAMS
        .iter()
        .copied()
        .find(|t| t.abbreviation.eq_ignore_ascii_case(abbr.trim()))
}

/// Resolve a user-supplied team reference.
///
/// Accepts a team id, abbreviation, full name, nickname or city. Exact
/// matches win; otherwise a unique substring of the full name is accepted.
pub fn find_team(query: &str) -> Result<Team> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Err(IntelError::TeamNotFound {
            query: query.to_string(),
        });
    }

    if let Ok(id) = q.parse::<u32>() {
        return team_by_id(TeamId::new(id)).ok_or_else(|| IntelError::TeamNotFound {
            query: query.to_string(),
        });
    }

    let exact: Vec<Team> = TEAMS
        .iter()
        .copied()
        .filter(|t| {
            t.abbreviation.to_lowercase() == q
                || t.full_name.to_lowercase() == q
                || t.nickname.to_lowercase() == q
                || t.city.to_lowercase() == q
        })
        .collect();

    let candidates = if exact.is_empty() {
        TEAMS
            .iter()
            .copied()
            .filter(|t| t.full_name.to_lowercase().contains(&q))
            .collect()
    } else {
        exact
    };

    match candidates.as_slice() {
        [] => Err(IntelError::TeamNotFound {
            query: query.to_string(),
        }),
        [only] => Ok(*only),
        many => Err(IntelError::AmbiguousTeam {
            query: query.to_string(),
            candidates: many
                .iter()
                .map(|t| t.full_name)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_teams_sorted_and_complete() {
        let teams = all_teams();
        assert_eq!(teams.len(), TEAM_COUNT as usize);
        assert_eq!(teams[0].full_name, "Atlanta Hawks");
        assert_eq!(teams[29].full_name, "Washington Wizards");
        assert!(teams.windows(2).all(|w| w[0].full_name <= w[1].full_name));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = TEAMS.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_find_team_by_each_form() {
        assert_eq!(find_team("LAL").unwrap().full_name, "Los Angeles Lakers");
        assert_eq!(find_team("boston celtics").unwrap().abbreviation, "BOS");
        assert_eq!(find_team("Knicks").unwrap().abbreviation, "NYK");
        assert_eq!(find_team("Oklahoma City").unwrap().abbreviation, "OKC");
        assert_eq!(find_team("1610612744").unwrap().abbreviation, "GSW");
        assert_eq!(find_team("trail").unwrap().abbreviation, "POR");
    }

    #[test]
    fn test_find_team_ambiguous_city() {
        match find_team("Los Angeles") {
            Err(IntelError::AmbiguousTeam { candidates, .. }) => {
                assert!(candidates.contains("Clippers"));
                assert!(candidates.contains("Lakers"));
            }
            other => panic!("Expected AmbiguousTeam, got {:?}", other),
        }
    }

    #[test]
    fn test_find_team_unknown() {
        assert!(matches!(
            find_team("Seattle SuperSonics"),
            Err(IntelError::TeamNotFound { .. })
        ));
        assert!(matches!(find_team("  "), Err(IntelError::TeamNotFound { .. })));
        assert!(matches!(find_team("42"), Err(IntelError::TeamNotFound { .. })));
    }

    #[test]
    fn test_team_by_abbreviation() {
        assert_eq!(team_by_abbreviation("phx").unwrap().nickname, "Suns");
        assert!(team_by_abbreviation("SEA").is_none());
    }
}
