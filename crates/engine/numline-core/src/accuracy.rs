//! Grading a chosen value against the round's target.

use numline_api_core::Range;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HIT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_NEAR_MISS_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hit,
    NearMiss,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("thresholds must be finite and non-negative (hit {hit}, near miss {near_miss})")]
    Invalid { hit: f64, near_miss: f64 },
    #[error("hit threshold {hit} exceeds near-miss threshold {near_miss}")]
    Inverted { hit: f64, near_miss: f64 },
}

/// Error ratios (fractions of the range span) that separate hits, near misses and misses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyThresholds {
    hit: f64,
    near_miss: f64,
}

impl AccuracyThresholds {
    /// Validate and build a threshold pair. `hit` may equal `near_miss`, in
    /// which case there is no near-miss band.
    pub fn new(hit: f64, near_miss: f64) -> Result<Self, ThresholdError> {
        let valid = |t: f64| t.is_finite() && t >= 0.0;
        if !valid(hit) || !valid(near_miss) {
            return Err(ThresholdError::Invalid { hit, near_miss });
        }
        if hit > near_miss {
            return Err(ThresholdError::Inverted { hit, near_miss });
        }
        Ok(AccuracyThresholds { hit, near_miss })
    }

    pub fn hit(&self) -> f64 {
        self.hit
    }

    pub fn near_miss(&self) -> f64 {
        self.near_miss
    }
}

impl Default for AccuracyThresholds {
    fn default() -> Self {
        AccuracyThresholds {
            hit: DEFAULT_HIT_THRESHOLD,
            near_miss: DEFAULT_NEAR_MISS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub outcome: Outcome,
    /// 100 at the target, falling to 0 at the near-miss boundary. Display only.
    pub closeness_percent: f64,
    /// `|clicked - target| / |span|`.
    pub error: f64,
}

/// Distance between `clicked` and `target` as a fraction of the range span.
pub fn normalized_error(clicked: f64, target: f64, range: &Range) -> f64 {
    (clicked - target).abs() / range.span().abs()
}

/// `clamp(0, 100, 100 * (1 - error / near_miss))`.
pub fn closeness_percent(error: f64, near_miss: f64) -> f64 {
    if !error.is_finite() {
        return 0.0;
    }
    if near_miss <= 0.0 {
        return if error == 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 * (1.0 - error / near_miss)).clamp(0.0, 100.0)
}

/// Classify an error ratio. Both bounds are inclusive.
pub fn outcome_for(error: f64, thresholds: &AccuracyThresholds) -> Outcome {
    if error <= thresholds.hit {
        Outcome::Hit
    } else if error <= thresholds.near_miss {
        Outcome::NearMiss
    } else {
        Outcome::Miss
    }
}

pub fn classify(
    clicked: f64,
    target: f64,
    range: &Range,
    thresholds: &AccuracyThresholds,
) -> Classification {
    let error = normalized_error(clicked, target, range);
    Classification {
        outcome: outcome_for(error, thresholds),
        closeness_percent: closeness_percent(error, thresholds.near_miss),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit() -> Range {
        Range::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn exact_answer_is_full_hit() {
        let c = classify(0.4, 0.4, &unit(), &AccuracyThresholds::default());
        assert_eq!(c.outcome, Outcome::Hit);
        assert_abs_diff_eq!(c.closeness_percent, 100.0);
        assert_abs_diff_eq!(c.error, 0.0);
    }

    #[test]
    fn hit_boundary_is_inclusive() {
        let c = classify(0.05, 0.0, &unit(), &AccuracyThresholds::default());
        assert_eq!(c.error, 0.05);
        assert_eq!(c.outcome, Outcome::Hit);
    }

    #[test]
    fn near_miss_band_and_miss() {
        let t = AccuracyThresholds::default();
        assert_eq!(classify(0.08, 0.0, &unit(), &t).outcome, Outcome::NearMiss);
        assert_eq!(classify(0.1, 0.0, &unit(), &t).outcome, Outcome::NearMiss);
        assert_eq!(classify(0.1000001, 0.0, &unit(), &t).outcome, Outcome::Miss);
        assert_abs_diff_eq!(classify(0.9, 0.0, &unit(), &t).closeness_percent, 0.0);
    }

    #[test]
    fn error_is_range_independent() {
        let wide = Range::new(0.0, 100.0).unwrap();
        let c = classify(45.0, 50.0, &wide, &AccuracyThresholds::default());
        assert_abs_diff_eq!(c.error, 0.05);
        assert_eq!(c.outcome, Outcome::Hit);
        assert_abs_diff_eq!(c.closeness_percent, 50.0, epsilon = 1e-9);

        let descending = Range::new(10.0, 0.0).unwrap();
        let c = classify(3.0, 2.0, &descending, &AccuracyThresholds::default());
        assert_abs_diff_eq!(c.error, 0.1);
        assert!(c.error >= 0.0);
    }

    #[test]
    fn thresholds_vary_per_round() {
        let strict = AccuracyThresholds::new(0.01, 0.02).unwrap();
        assert_eq!(classify(0.53, 0.5, &unit(), &strict).outcome, Outcome::Miss);
        let lenient = AccuracyThresholds::new(0.2, 0.3).unwrap();
        assert_eq!(classify(0.65, 0.5, &unit(), &lenient).outcome, Outcome::Hit);
    }

    #[test]
    fn inverted_or_invalid_thresholds_are_rejected() {
        assert!(matches!(
            AccuracyThresholds::new(0.2, 0.1),
            Err(ThresholdError::Inverted { .. })
        ));
        assert!(matches!(
            AccuracyThresholds::new(-0.1, 0.1),
            Err(ThresholdError::Invalid { .. })
        ));
        assert!(matches!(
            AccuracyThresholds::new(0.1, f64::NAN),
            Err(ThresholdError::Invalid { .. })
        ));
        assert!(AccuracyThresholds::new(0.1, 0.1).is_ok());
    }

    #[test]
    fn closeness_stays_in_bounds() {
        assert_eq!(closeness_percent(0.0, 0.0), 100.0);
        assert_eq!(closeness_percent(0.01, 0.0), 0.0);
        assert_eq!(closeness_percent(f64::NAN, 0.1), 0.0);
        for i in 0..100 {
            let p = closeness_percent(i as f64 * 0.01, 0.1);
            assert!((0.0..=100.0).contains(&p));
        }
    }
}
