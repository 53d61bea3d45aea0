//! Model and runtime configuration (`model.toml`).
//!
//! Every field has a default, so the file is optional and may set only the
//! values it wants to change:
//!
//! ```toml
//! recent_games = 10
//!
//! [weights]
//! head_to_head = 0.3
//!
//! [thresholds]
//! likely = 0.08
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    error::IntelError,
    model::{Adjustments, ForecastWeights, Thresholds},
    Result, CONFIG_ENV_VAR,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    pub roster_ttl_secs: u64,
    pub averages_ttl_secs: u64,
    pub game_log_ttl_secs: u64,
    pub defense_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            roster_ttl_secs: 3600,
            averages_ttl_secs: 3600,
            game_log_ttl_secs: 3600,
            defense_ttl_secs: 86400,
        }
    }
}

impl CacheSettings {
    pub fn roster_ttl(&self) -> Duration {
        Duration::from_secs(self.roster_ttl_secs)
    }

    pub fn averages_ttl(&self) -> Duration {
        Duration::from_secs(self.averages_ttl_secs)
    }

    pub fn game_log_ttl(&self) -> Duration {
        Duration::from_secs(self.game_log_ttl_secs)
    }

    pub fn defense_ttl(&self) -> Duration {
        Duration::from_secs(self.defense_ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub const DEFAULT_RECENT_GAMES: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights: ForecastWeights,
    pub thresholds: Thresholds,
    pub adjustments: Adjustments,
    pub recent_games: usize,
    pub cache: CacheSettings,
    pub http: HttpSettings,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights: ForecastWeights::default(),
            thresholds: Thresholds::default(),
            adjustments: Adjustments::default(),
            recent_games: DEFAULT_RECENT_GAMES,
            cache: CacheSettings::default(),
            http: HttpSettings::default(),
        }
    }
}

impl ModelConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ModelConfig = toml::from_str(contents).map_err(|e| IntelError::Config {
            field: "model.toml".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (field, value) in [
            ("weights.season", w.season),
            ("weights.recent", w.recent),
            ("weights.head_to_head", w.head_to_head),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config_error(field, format!("must be >= 0, got {}", value)));
            }
        }
        if w.season + w.recent + w.head_to_head <= 0.0 {
            return Err(config_error("weights", "at least one weight must be positive"));
        }

        self.thresholds.validate()?;

        let a = &self.adjustments;
        if !(0.0..1.0).contains(&a.max_defense_adjustment) {
            return Err(config_error(
                "adjustments.max_defense_adjustment",
                format!("must be in [0, 1), got {}", a.max_defense_adjustment),
            ));
        }
        if !a.pace_weight.is_finite() || a.pace_weight < 0.0 {
            return Err(config_error(
                "adjustments.pace_weight",
                format!("must be >= 0, got {}", a.pace_weight),
            ));
        }
        if !(a.blowout_discount > 0.0 && a.blowout_discount <= 1.0) {
            return Err(config_error(
                "adjustments.blowout_discount",
                format!("must be in (0, 1], got {}", a.blowout_discount),
            ));
        }

        if self.recent_games == 0 || self.recent_games > 82 {
            return Err(config_error(
                "recent_games",
                format!("must be between 1 and 82, got {}", self.recent_games),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(config_error("http.timeout_secs", "must be positive"));
        }
        Ok(())
    }
}

fn config_error(field: &str, message: impl Into<String>) -> IntelError {
    IntelError::Config {
        field: field.to_string(),
        message: message.into(),
    }
}

/// `~/.config/nba-intel/model.toml` (platform config dir).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nba-intel").join("model.toml"))
}

/// Load the model config.
///
/// An explicit path (flag or `NBA_INTEL_CONFIG`) must exist. The default
/// location is optional; without it the built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<ModelConfig> {
    let env_path = std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
    let required = explicit.map(Path::to_path_buf).or(env_path);

    let path = match required {
        Some(path) => {
            if !path.exists() {
                return Err(config_error(
                    "config",
                    format!("file not found: {}", path.display()),
                ));
            }
            path
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                tracing::debug!("no model config found, using defaults");
                return Ok(ModelConfig::default());
            }
        },
    };

    tracing::debug!(path = %path.display(), "loading model config");
    let contents = std::fs::read_to_string(&path)?;
    ModelConfig::from_toml_str(&contents)
}
