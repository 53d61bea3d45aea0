use serde::{Deserialize, Serialize};

use crate::nba::teams::TEAM_COUNT;

/// Relative weight of each average in the base value. Only the components
/// that are present take part; their weights are renormalised.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastWeights {
    pub season: f64,
    pub recent: f64,
    pub head_to_head: f64,
}

impl Default for ForecastWeights {
    fn default() -> Self {
        Self {
            season: 0.4,
            recent: 0.4,
            head_to_head: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Adjustments {
    /// Largest relative swing from the opponent's defence (rank 1 or last).
    pub max_defense_adjustment: f64,
    /// Share of the opponent's relative pace that carries into the expectation.
    pub pace_weight: f64,
    /// Multiplier applied when a blowout (and short minutes) is expected.
    pub blowout_discount: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            max_defense_adjustment: 0.08,
            pace_weight: 0.5,
            blowout_discount: 0.92,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInputs {
    pub season_avg: f64,
    pub recent_avg: Option<f64>,
    pub head_to_head_avg: Option<f64>,
    pub defense_rank: Option<u8>,
    pub teams_in_league: u8,
    pub opponent_pace: Option<f64>,
    pub league_pace: Option<f64>,
    pub blowout: bool,
}

impl ForecastInputs {
    pub fn from_season_average(season_avg: f64) -> Self {
        Self {
            season_avg,
            recent_avg: None,
            head_to_head_avg: None,
            defense_rank: None,
            teams_in_league: TEAM_COUNT,
            opponent_pace: None,
            league_pace: None,
            blowout: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub expectation: f64,
    pub base: f64,
    pub defense_adjustment: f64,
    pub pace_adjustment: f64,
    pub blowout_factor: f64,
    pub components_used: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastModel {
    pub weights: ForecastWeights,
    pub adjustments: Adjustments,
    pub use_pace: bool,
}

impl Default for ForecastModel {
    fn default() -> Self {
        Self::new(ForecastWeights::default(), Adjustments::default())
    }
}

impl ForecastModel {
    pub fn new(weights: ForecastWeights, adjustments: Adjustments) -> Self {
        Self {
            weights,
            adjustments,
            use_pace: true,
        }
    }

    pub fn without_pace(mut self) -> Self {
        self.use_pace = false;
        self
    }

    /// `base * (1 + defence) * (1 + pace) * blowout`, floored at zero.
    pub fn forecast(&self, inputs: &ForecastInputs) -> Forecast {
        let (base, components_used) = weighted_base(
            &self.weights,
            inputs.season_avg,
            inputs.recent_avg,
            inputs.head_to_head_avg,
        );

        let defense = inputs
            .defense_rank
            .map(|rank| {
                defense_adjustment(
                    rank,
                    inputs.teams_in_league,
                    self.adjustments.max_defense_adjustment,
                )
            })
            .unwrap_or(0.0);

        let pace = match (self.use_pace, inputs.opponent_pace, inputs.league_pace) {
            (true, Some(opp), Some(league)) => {
                pace_adjustment(opp, league, self.adjustments.pace_weight)
            }
            _ => 0.0,
        };

        let blowout_factor = if inputs.blowout {
            self.adjustments.blowout_discount
        } else {
            1.0
        };

        let expectation = (base * (1.0 + defense) * (1.0 + pace) * blowout_factor).max(0.0);

        Forecast {
            expectation,
            base,
            defense_adjustment: defense,
            pace_adjustment: pace,
            blowout_factor,
            components_used,
        }
    }
}

/// Weighted mean of the available averages and how many took part.
///
/// Falls back to the season average alone when no weighted component is
/// available (e.g. every present component has weight zero).
pub fn weighted_base(
    weights: &ForecastWeights,
    season: f64,
    recent: Option<f64>,
    head_to_head: Option<f64>,
) -> (f64, u8) {
    let components = [
        (weights.season, Some(season)),
        (weights.recent, recent),
        (weights.head_to_head, head_to_head),
    ];

    let mut weight_sum = 0.0;
    let mut value_sum = 0.0;
    let mut used = 0u8;
    for (weight, value) in components {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            if weight > 0.0 {
                weight_sum += weight;
                value_sum += weight * v;
                used += 1;
            }
        }
    }

    if weight_sum <= 0.0 {
        (season.max(0.0), 1)
    } else {
        (value_sum / weight_sum, used)
    }
}

/// Linear in rank: `-max` for the best defence, `+max` for the worst, zero
/// at the midpoint of the league.
pub fn defense_adjustment(rank: u8, teams: u8, max: f64) -> f64 {
    if teams < 2 || rank == 0 {
        return 0.0;
    }
    let rank = f64::from(rank.min(teams));
    let teams = f64::from(teams);
    let mid = (teams + 1.0) / 2.0;
    let half_span = (teams - 1.0) / 2.0;
    (rank - mid) / half_span * max
}

pub fn pace_adjustment(opponent_pace: f64, league_pace: f64, weight: f64) -> f64 {
    if opponent_pace <= 0.0 || league_pace <= 0.0 {
        return 0.0;
    }
    (opponent_pace / league_pace - 1.0) * weight
}
