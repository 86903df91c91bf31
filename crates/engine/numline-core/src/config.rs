//! Per-round configuration supplied by the host.

use numline_api_core::LabelStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accuracy::{
    AccuracyThresholds, ThresholdError, DEFAULT_HIT_THRESHOLD, DEFAULT_NEAR_MISS_THRESHOLD,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("round config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Thresholds(#[from] ThresholdError),
}

/// Knobs that may change from one round to the next. Missing JSON fields fall
/// back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub hit_threshold: f64,
    pub near_miss_threshold: f64,
    /// Label every intermediate tick when the question names no visible subset.
    pub show_intermediate_numbers: bool,
    pub label_style: LabelStyle,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            hit_threshold: DEFAULT_HIT_THRESHOLD,
            near_miss_threshold: DEFAULT_NEAR_MISS_THRESHOLD,
            show_intermediate_numbers: false,
            label_style: LabelStyle::Decimal,
        }
    }
}

impl RoundConfig {
    /// Validated threshold pair for the classifier.
    pub fn thresholds(&self) -> Result<AccuracyThresholds, ThresholdError> {
        AccuracyThresholds::new(self.hit_threshold, self.near_miss_threshold)
    }

    /// Parse and validate a config blob.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: RoundConfig = serde_json::from_str(json)?;
        cfg.thresholds()?;
        Ok(cfg)
    }
}
