//! Zoom scaffolds: successive even subdivisions that lead a learner to the target.

use log::warn;
use numline_api_core::{approx_eq, format_label, round_to, LabelStyle, Range};
use serde::Serialize;

use super::Tick;

/// Subdivision counts tried, coarsest first, before falling back to two stages.
pub const ZOOM_SUBDIVISIONS: [u32; 3] = [2, 5, 10];
/// Rounding applied to generated interior values so float noise cannot create
/// near-duplicate ticks.
pub const ZOOM_DECIMALS: i32 = 5;

const FALLBACK_COARSE: u32 = 10;
const FALLBACK_FINE: u32 = 2;

/// One or two stages of ticks, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomPlan {
    pub stages: Vec<Vec<Tick>>,
}

impl ZoomPlan {
    pub fn is_single_stage(&self) -> bool {
        self.stages.len() == 1
    }

    /// The stage the learner answers on.
    pub fn final_stage(&self) -> &[Tick] {
        self.stages.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// `count + 1` evenly spaced values from `range.start()` to `range.end()`.
/// The endpoints are kept exact; interior values are rounded to [`ZOOM_DECIMALS`]
/// unless rounding would merge neighbours, as on very narrow ranges.
pub fn subdivide(range: &Range, count: u32) -> Vec<f64> {
    let count = count.max(1);
    let raw: Vec<f64> = (0..=count)
        .map(|i| match i {
            0 => range.start(),
            i if i == count => range.end(),
            i => range.lerp(f64::from(i) / f64::from(count)),
        })
        .collect();
    let last = raw.len() - 1;
    let rounded: Vec<f64> = raw
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if i == 0 || i == last {
                v
            } else {
                round_to(v, ZOOM_DECIMALS)
            }
        })
        .collect();
    if is_ordered(range, &rounded) {
        rounded
    } else {
        raw
    }
}

/// Strictly increasing along the track with no two values equal under `approx_eq`.
fn is_ordered(range: &Range, values: &[f64]) -> bool {
    values.windows(2).all(|w| {
        !approx_eq(w[0], w[1]) && range.fraction_of(w[0]) < range.fraction_of(w[1])
    })
}

fn stage(values: &[f64], style: LabelStyle) -> Vec<Tick> {
    let mut values = values.to_vec();
    values.dedup_by(|a, b| approx_eq(*a, *b));
    let last = values.len().saturating_sub(1);
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let label = format_label(v, style);
            if i == 0 || i == last {
                Tick::endpoint(v, label)
            } else {
                Tick::labeled(v, label)
            }
        })
        .collect()
}

/// Plan the zoom scaffold for `target` on `range`.
///
/// If the target lands on a boundary of 2, 5 or 10 even parts (within `VALUE_EPSILON`), a
/// single stage at that granularity is enough. Otherwise stage one splits the range into tenths and stage
/// two halves the tenth `(a, b]` holding the target. A target outside the range gets only
/// the tenths.
pub fn plan_zoom(range: &Range, target: f64, style: LabelStyle) -> ZoomPlan {
    for count in ZOOM_SUBDIVISIONS {
        let values = subdivide(range, count);
        if is_ordered(range, &values) && values.iter().any(|v| approx_eq(*v, target)) {
            return ZoomPlan {
                stages: vec![stage(&values, style)],
            };
        }
    }

    let mut coarse = subdivide(range, FALLBACK_COARSE);
    coarse.dedup_by(|a, b| approx_eq(*a, *b));
    let first = stage(&coarse, style);
    if !target.is_finite() || !range.contains(target) {
        warn!("plan_zoom: target {target} outside range; returning coarse stage only");
        return ZoomPlan {
            stages: vec![first],
        };
    }

    let t = range.fraction_of(target);
    let bracket = coarse
        .windows(2)
        .find(|w| t > range.fraction_of(w[0]) && t <= range.fraction_of(w[1]));
    let fine = bracket
        .and_then(|w| Range::new(w[0], w[1]).ok())
        .map(|sub| stage(&subdivide(&sub, FALLBACK_FINE), style));

    let mut stages = vec![first];
    stages.extend(fine);
    ZoomPlan { stages }
}
