//! Learner input, reduced to a single canonical value per interaction.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use numline_api_core::parse_str;
use numline_core::RangeMapper;

/// One learner interaction. Serializes as `{"click": {"x": 120.0}}`,
/// `{"typed": "3/4"}` or `{"value": 0.75}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerInput {
    /// A pointer position along the track.
    Click { x: f64 },
    /// Text entered in a numeric field.
    Typed(String),
    /// A value already in range units, e.g. from keyboard stepping.
    Value(f64),
}

impl LearnerInput {
    /// The value the learner chose. Clicks past either end of the track clamp
    /// to the range; typed and direct values are taken as given.
    pub fn reduce(&self, mapper: &RangeMapper) -> Result<f64> {
        match self {
            LearnerInput::Click { x } => {
                if !x.is_finite() {
                    bail!("click position {x} is not finite");
                }
                mapper
                    .to_value_clamped(*x)
                    .ok_or_else(|| anyhow!("track has zero length; cannot map click at {x}"))
            }
            LearnerInput::Typed(text) => {
                parse_str(text).with_context(|| format!("typed answer {text:?}"))
            }
            LearnerInput::Value(v) if v.is_finite() => Ok(*v),
            LearnerInput::Value(v) => bail!("answer {v} is not finite"),
        }
    }
}
