use crate::{
    nba::types::{GameLogEntry, StatLine, TeamDefense},
    StatCategory,
};


/// Rank teams by defensive rating, lowest (best) first. Rank 1 is the best
/// defence. The sort is stable, so ties keep the API's order.
pub fn rank_defenses(mut rows: Vec<TeamDefense>) -> Vec<TeamDefense> {
    rows.sort_by(|a, b| a.def_rating.total_cmp(&b.def_rating));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = u8::try_from(i + 1).unwrap_or(u8::MAX);
    }
    rows
}

/// Mean stat line over a set of games. `None` for an empty slice.
pub fn average_line<'a, I>(games: I) -> Option<StatLine>
where
    I: IntoIterator<Item = &'a GameLogEntry>,
{
    let mut total = StatLine::default();
    let mut count = 0usize;
    for game in games {
        for stat in StatCategory::ALL {
            total.set(stat, total.get(stat) + game.line.get(stat));
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    for stat in StatCategory::ALL {
        total.set(stat, total.get(stat) / count as f64);
    }
    Some(total)
}

/// Average over the `n` most recent games of a newest-first log.
pub fn recent_average(log: &[GameLogEntry], n: usize) -> Option<StatLine> {
    if n == 0 {
        return None;
    }
    average_line(log.iter().take(n))
}

/// Average over the games played against one opponent.
pub fn head_to_head_average(log: &[GameLogEntry], opponent_abbr: &str) -> Option<StatLine> {
    average_line(log.iter().filter(|g| {
        g.opponent_abbreviation()
            .is_some_and(|abbr| abbr.eq_ignore_ascii_case(opponent_abbr))
    }))
}

/// Number of games in the log against one opponent.
pub fn head_to_head_games(log: &[GameLogEntry], opponent_abbr: &str) -> usize {
    log.iter()
        .filter(|g| {
            g.opponent_abbreviation()
                .is_some_and(|abbr| abbr.eq_ignore_ascii_case(opponent_abbr))
        })
        .count()
}

/// League-wide mean pace, ignoring rows with no pace recorded.
pub fn league_average_pace(defenses: &[TeamDefense]) -> Option<f64> {
    let paces: Vec<f64> = defenses.iter().map(|d| d.pace).filter(|p| *p > 0.0).collect();
    if paces.is_empty() {
        None
    } else {
        Some(paces.iter().sum::<f64>() / paces.len() as f64)
    }
}

/// Per-game series of one stat, oldest first (for the line chart).
pub fn stat_series(log: &[GameLogEntry], stat: StatCategory, n: usize) -> Vec<f64> {
    let mut series: Vec<f64> = log.iter().take(n).map(|g| g.line.get(stat)).collect();
    series.reverse();
    series
}
