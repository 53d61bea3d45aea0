use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{error::IntelError, Locale, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Likely,
    Uncertain,
    Unlikely,
}

impl Verdict {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Verdict::Likely, Locale::En) => "Likely",
            (Verdict::Uncertain, Locale::En) => "Uncertain",
            (Verdict::Unlikely, Locale::En) => "Unlikely",
            (Verdict::Likely, Locale::Pt) => "Provável",
            (Verdict::Uncertain, Locale::Pt) => "Incerto",
            (Verdict::Unlikely, Locale::Pt) => "Improvável",
        }
    }

    pub fn mark(&self) -> &'static str {
        match self {
            Verdict::Likely => "✅",
            Verdict::Uncertain => "⚠️",
            Verdict::Unlikely => "❌",
        }
    }

    /// Storage/JSON key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Likely => "likely",
            Verdict::Uncertain => "uncertain",
            Verdict::Unlikely => "unlikely",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "likely" => Some(Verdict::Likely),
            "uncertain" => Some(Verdict::Uncertain),
            "unlikely" => Some(Verdict::Unlikely),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(Locale::En))
    }
}

/// Relative-gap cutoffs: at or below `likely` is Likely, at or below
/// `uncertain` is Uncertain, anything wider is Unlikely.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Thresholds {
    pub likely: f64,
    pub uncertain: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            likely: 0.10,
            uncertain: 0.25,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if !(self.likely.is_finite() && self.likely > 0.0) {
            return Err(IntelError::Config {
                field: "thresholds.likely".to_string(),
                message: format!("must be a positive number, got {}", self.likely),
            });
        }
        if !(self.uncertain.is_finite() && self.uncertain >= self.likely) {
            return Err(IntelError::Config {
                field: "thresholds.uncertain".to_string(),
                message: format!(
                    "must be at least thresholds.likely ({}), got {}",
                    self.likely, self.uncertain
                ),
            });
        }
        Ok(())
    }

    pub fn classify(&self, gap: f64) -> Verdict {
        if gap <= self.likely {
            Verdict::Likely
        } else if gap <= self.uncertain {
            Verdict::Uncertain
        } else {
            Verdict::Unlikely
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Judgement {
    pub prediction: f64,
    pub expectation: f64,
    /// `None` when the expectation is zero and no relative gap exists.
    pub gap: Option<f64>,
    pub verdict: Verdict,
}

/// `|prediction - expectation| / expectation`, undefined for a zero expectation.
pub fn relative_gap(prediction: f64, expectation: f64) -> Option<f64> {
    (expectation > 0.0).then(|| (prediction - expectation).abs() / expectation)
}

pub fn judge(prediction: f64, expectation: f64, thresholds: &Thresholds) -> Result<Judgement> {
    if !prediction.is_finite() || prediction < 0.0 {
        return Err(IntelError::InvalidPrediction { value: prediction });
    }

    let gap = relative_gap(prediction, expectation.max(0.0));
    let verdict = match gap {
        Some(gap) => thresholds.classify(gap),
        None if prediction == 0.0 => Verdict::Likely,
        None => Verdict::Unlikely,
    };

    Ok(Judgement {
        prediction,
        expectation,
        gap,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_buckets() {
        let t = Thresholds::default();
        assert_eq!(judge(21.0, 20.0, &t).unwrap().verdict, Verdict::Likely);
        assert_eq!(judge(24.0, 20.0, &t).unwrap().verdict, Verdict::Uncertain);
        assert_eq!(judge(15.5, 20.0, &t).unwrap().verdict, Verdict::Uncertain);
        assert_eq!(judge(30.0, 20.0, &t).unwrap().verdict, Verdict::Unlikely);
        assert_eq!(judge(10.0, 20.0, &t).unwrap().verdict, Verdict::Unlikely);
    }

    #[test]
    fn test_judge_boundaries_are_inclusive() {
        let t = Thresholds::default();
        // gap of exactly 0.25 (25 vs 20)
        assert_eq!(judge(25.0, 20.0, &t).unwrap().verdict, Verdict::Uncertain);
        // gap of exactly 0.5 vs a 0.5 threshold
        let wide = Thresholds {
            likely: 0.5,
            uncertain: 0.5,
        };
        assert_eq!(judge(3.0, 2.0, &wide).unwrap().verdict, Verdict::Likely);
    }

    #[test]
    fn test_judge_zero_expectation() {
        let t = Thresholds::default();
        let zero = judge(0.0, 0.0, &t).unwrap();
        assert_eq!(zero.verdict, Verdict::Likely);
        assert_eq!(zero.gap, None);
        assert_eq!(judge(1.0, 0.0, &t).unwrap().verdict, Verdict::Unlikely);
    }

    #[test]
    fn test_judge_rejects_bad_prediction() {
        let t = Thresholds::default();
        assert!(matches!(
            judge(-1.0, 20.0, &t),
            Err(IntelError::InvalidPrediction { .. })
        ));
        assert!(judge(f64::NAN, 20.0, &t).is_err());
        assert!(judge(f64::INFINITY, 20.0, &t).is_err());
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(Thresholds::default().validate().is_ok());
        assert!(Thresholds {
            likely: 0.0,
            uncertain: 0.2
        }
        .validate()
        .is_err());
        match (Thresholds {
            likely: 0.3,
            uncertain: 0.2,
        })
        .validate()
        {
            Err(IntelError::Config { field, .. }) => assert_eq!(field, "thresholds.uncertain"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_labels_and_keys() {
        assert_eq!(Verdict::Likely.label(Locale::Pt), "Provável");
        assert_eq!(Verdict::Uncertain.label(Locale::Pt), "Incerto");
        assert_eq!(Verdict::Unlikely.label(Locale::Pt), "Improvável");
        assert_eq!(Verdict::Unlikely.to_string(), "Unlikely");
        for v in [Verdict::Likely, Verdict::Uncertain, Verdict::Unlikely] {
            assert_eq!(Verdict::from_key(v.as_str()), Some(v));
        }
        assert_eq!(Verdict::from_key("maybe"), None);
    }
}
