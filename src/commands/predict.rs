//! Forecast a player's line against an opponent and judge the user's picks.
//!
//! Loading degrades step by step: the roster and season averages are
//! required, while a missing game log or defence table only removes the
//! recent, head-to-head, defence and pace terms from the forecast. The
//! defence table is always the requested season's, even when the averages
//! fall back to the previous one.

use serde::Serialize;

use crate::{
    error::IntelError,
    model::{judge, matchup_difficulty, Forecast, ForecastInputs, ForecastModel, Judgement, Thresholds, Verdict},
    nba::{
        cached::{load_game_log, load_roster, load_season_averages_with_fallback, load_team_defense},
        compute::{head_to_head_games, stat_series},
        teams::{find_team, Team},
        types::{GameLogEntry, RosterEntry, SeasonAverages, TeamDefense},
    },
    render::{bar_chart, defense_footer, sparkline, verdict_card, BarGroup, Tone},
    storage::{ForecastDatabase, NewForecast},
    Result, Season, StatCategory,
};

use super::common::{build_inputs, league_size, opponent_defense, resolve_player, CommandContext};

const CHART_WIDTH: usize = 30;

/// The user's picks. Points are required, the rest optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Predictions {
    pub points: f64,
    pub assists: Option<f64>,
    pub rebounds: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
}

impl Predictions {
    pub fn get(&self, stat: StatCategory) -> Option<f64> {
        match stat {
            StatCategory::Points => Some(self.points),
            StatCategory::Assists => self.assists,
            StatCategory::Rebounds => self.rebounds,
            StatCategory::Steals => self.steals,
            StatCategory::Blocks => self.blocks,
        }
    }

    /// Reject negative or non-finite picks before any request is made.
    pub fn validate(&self) -> Result<()> {
        for stat in StatCategory::ALL {
            if let Some(value) = self.get(stat) {
                if !value.is_finite() || value < 0.0 {
                    return Err(IntelError::InvalidPrediction { value });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PredictParams {
    pub team: String,
    pub player: String,
    pub opponent: String,
    pub predictions: Predictions,
    pub last_n: Option<usize>,
    pub blowout: bool,
    pub no_pace: bool,
    pub save: bool,
}

/// Everything fetched for one forecast.
#[derive(Debug, Clone)]
pub struct LoadedStats {
    pub player: RosterEntry,
    pub team: Team,
    pub opponent: Team,
    pub season: Season,
    pub averages: SeasonAverages,
    pub log: Vec<GameLogEntry>,
    pub defense: Vec<TeamDefense>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub stat: StatCategory,
    pub season_avg: f64,
    pub recent_avg: Option<f64>,
    pub head_to_head_avg: Option<f64>,
    pub forecast: Forecast,
    /// Present when the user gave a pick for this category.
    pub judgement: Option<Judgement>,
    /// Defence-only outlook for categories without a pick.
    pub matchup: Option<Verdict>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictReport {
    pub player: RosterEntry,
    pub team: Team,
    pub opponent: Team,
    pub season: Season,
    pub games_played: u32,
    pub recent_games: usize,
    pub head_to_head_games: usize,
    pub defense: Option<TeamDefense>,
    pub teams_in_league: u8,
    pub categories: Vec<CategoryReport>,
    /// Points over the recent games, oldest first.
    pub recent_points: Vec<f64>,
}

impl PredictReport {
    /// Journal rows for every judged category.
    pub fn journal_entries(&self) -> Vec<NewForecast> {
        self.categories
            .iter()
            .filter_map(|c| {
                c.judgement.map(|j| NewForecast {
                    player_id: self.player.player_id,
                    player_name: self.player.name.clone(),
                    opponent: self.opponent.abbreviation.to_string(),
                    season: self.season,
                    stat: c.stat,
                    prediction: j.prediction,
                    expectation: j.expectation,
                    verdict: j.verdict,
                })
            })
            .collect()
    }
}

/// Forecast one category and judge the pick, if any.
pub fn assess(
    model: &ForecastModel,
    thresholds: &Thresholds,
    stat: StatCategory,
    prediction: Option<f64>,
    inputs: &ForecastInputs,
) -> Result<CategoryReport> {
    let forecast = model.forecast(inputs);
    let judgement = prediction
        .map(|p| judge(p, forecast.expectation, thresholds))
        .transpose()?;
    let matchup = match judgement {
        Some(_) => None,
        None => inputs.defense_rank.map(matchup_difficulty),
    };

    Ok(CategoryReport {
        stat,
        season_avg: inputs.season_avg,
        recent_avg: inputs.recent_avg,
        head_to_head_avg: inputs.head_to_head_avg,
        forecast,
        judgement,
        matchup,
    })
}

pub fn build_report(
    stats: &LoadedStats,
    predictions: &Predictions,
    model: &ForecastModel,
    thresholds: &Thresholds,
    recent_games: usize,
    blowout: bool,
) -> Result<PredictReport> {
    let categories = StatCategory::ALL
        .iter()
        .map(|&stat| {
            let inputs = build_inputs(
                stat,
                &stats.averages,
                &stats.log,
                recent_games,
                &stats.opponent,
                &stats.defense,
                blowout,
            );
            assess(model, thresholds, stat, predictions.get(stat), &inputs)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PredictReport {
        player: stats.player.clone(),
        team: stats.team,
        opponent: stats.opponent,
        season: stats.season,
        games_played: stats.averages.games_played,
        recent_games,
        head_to_head_games: head_to_head_games(&stats.log, stats.opponent.abbreviation),
        defense: opponent_defense(&stats.defense, &stats.opponent).cloned(),
        teams_in_league: league_size(&stats.defense),
        categories,
        recent_points: stat_series(&stats.log, StatCategory::Points, recent_games),
    })
}

/// Fetch the roster, averages, game log and defence table.
pub async fn load_stats(ctx: &CommandContext, params: &PredictParams) -> Result<LoadedStats> {
    let team = find_team(&params.team)?;
    let opponent = find_team(&params.opponent)?;

    let (roster, status) =
        load_roster(&ctx.client, &ctx.cache, team.id, ctx.season, ctx.refresh).await?;
    ctx.report_load(&format!("{} roster", team.abbreviation), status);
    let player = resolve_player(&roster, &params.player)?;

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
            "No {} averages for {}; using {}",
            ctx.season, player.name, season
        ));
    }

    let log = match load_game_log(&ctx.client, &ctx.cache, player.player_id, season, ctx.refresh)
        .await
    {
        Ok((log, status)) => {
            ctx.report_load("game log", status);
            log
        }
        Err(e) => {
            ctx.warn(&format!(
                "Could not load game log, forecasting without recent form: {}",
                e
            ));
            Vec::new()
        }
    };

    let defense = match load_team_defense(&ctx.client, &ctx.cache, ctx.season, ctx.refresh).await {
        Ok((rows, status)) => {
            ctx.report_load("defensive ratings", status);
            rows
        }
        Err(e) => {
            ctx.warn(&format!(
                "Could not load defensive ratings, forecasting without defence or pace: {}",
                e
            ));
            Vec::new()
        }
    };

    Ok(LoadedStats {
        player,
        team,
        opponent,
        season,
        averages,
        log,
        defense,
    })
}

pub async fn predict_report(ctx: &CommandContext, params: &PredictParams) -> Result<PredictReport> {
    params.predictions.validate()?;

    let stats = load_stats(ctx, params).await?;
    let mut model = ctx.model();
    if params.no_pace {
        model = model.without_pace();
    }
    let recent_games = params.last_n.unwrap_or(ctx.config.recent_games).max(1);

    build_report(
        &stats,
        &params.predictions,
        &model,
        &ctx.config.thresholds,
        recent_games,
        params.blowout,
    )
}

/// Write every judged category to the journal; returns rows written.
pub fn record_report(db: &mut ForecastDatabase, report: &PredictReport) -> Result<usize> {
    let entries = report.journal_entries();
    for entry in &entries {
        db.record_forecast(entry)?;
    }
    Ok(entries.len())
}

fn detail(category: &CategoryReport) -> String {
    let expected = category.forecast.expectation;
    match (&category.judgement, category.matchup) {
        (Some(j), _) => match j.gap {
            Some(gap) => format!(
                "pick {:.1} vs expected {:.1} (gap {:.1}%)",
                j.prediction,
                expected,
                gap * 100.0
            ),
            None => format!("pick {:.1} vs expected {:.1}", j.prediction, expected),
        },
        (None, Some(_)) => format!("expected {:.1} (matchup only)", expected),
        (None, None) => format!("expected {:.1}", expected),
    }
}

fn print_report(ctx: &CommandContext, report: &PredictReport) {
    let painter = &ctx.painter;
    println!();
    println!(
        "{}",
        painter.paint(
            &format!(
                "{} ({}) vs {}, {}",
                report.player.name, report.team.full_name, report.opponent.full_name, report.season
            ),
            Tone::Bold
        )
    );
    println!(
        "{} GP | last {} games | {} vs {}",
        report.games_played, report.recent_games, report.head_to_head_games, report.opponent.abbreviation
    );
    println!();

    for category in &report.categories {
        let verdict = category
            .judgement
            .map(|j| j.verdict)
            .or(category.matchup);
        match verdict {
            Some(v) => println!(
                "{}",
                verdict_card(painter, ctx.locale, category.stat, v, &detail(category))
            ),
            None => println!(
                "{}",
                painter.paint(
                    &format!("▌ {:<9} {}", category.stat.to_string(), detail(category)),
                    Tone::Dim
                )
            ),
        }
    }

    if let Some(defense) = &report.defense {
        println!();
        println!(
            "{}",
            defense_footer(
                ctx.locale,
                report.opponent.full_name,
                defense.rank,
                report.teams_in_league
            )
        );
    }

    let groups: Vec<BarGroup> = report
        .categories
        .iter()
        .map(|c| {
            let mut bars = vec![("season", c.season_avg), ("expected", c.forecast.expectation)];
            if let Some(j) = c.judgement {
                bars.push(("pick", j.prediction));
            }
            BarGroup { stat: c.stat, bars }
        })
        .collect();
    println!();
    for line in bar_chart(&groups, CHART_WIDTH) {
        println!("{}", line);
    }

    if !report.recent_points.is_empty() {
        println!();
        println!(
            "PTS last {}  {}",
            report.recent_points.len(),
            painter.paint(&sparkline(&report.recent_points), Tone::Cyan)
        );
    }
}

pub async fn handle_predict(ctx: &CommandContext, params: PredictParams) -> Result<()> {
    // tarpaulin::skip - HTTP call, tested via predict_report
    let report = predict_report(ctx, &params).await?;

    if ctx.as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(ctx, &report);
    }

    if params.save {
        match ForecastDatabase::new().map_err(IntelError::from) {
            Ok(mut db) => {
                let written = record_report(&mut db, &report)?;
                tracing::debug!(written, "journal updated");
            }
            Err(e) => ctx.warn(&format!("Could not open the forecast journal: {}", e)),
        }
    }
    Ok(())
}
