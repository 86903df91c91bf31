//! Value <-> coordinate mapping along the drawn track.
//!
//! `coordinate = track.start + (value - range.start) / (range.end - range.start) * track.length`
//!
//! Unlike a remap node, values are not clamped: positions outside the range map
//! to coordinates outside the track and back again. Use
//! [`RangeMapper::to_value_clamped`] when a click must land on the line.

use numline_api_core::Range;
use serde::{Deserialize, Serialize};

/// Pixel extent of the number line, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub start: f64,
    pub end: f64,
}

impl Track {
    pub fn new(start: f64, end: f64) -> Self {
        Track { start, end }
    }

    /// Signed length `end - start`.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    fn is_degenerate(&self) -> bool {
        let len = self.length();
        len == 0.0 || !len.is_finite()
    }
}

impl Default for Track {
    fn default() -> Self {
        Track::new(0.0, 1.0)
    }
}

/// Map `value` on `range` to a coordinate on `track`.
pub fn to_coordinate(value: f64, range: &Range, track: &Track) -> f64 {
    track.start + range.fraction_of(value) * track.length()
}

/// Map a coordinate on `track` back to a value on `range`.
///
/// Returns `None` for a zero-length track, where every value sits on the same pixel.
pub fn to_value(coordinate: f64, range: &Range, track: &Track) -> Option<f64> {
    if track.is_degenerate() {
        return None;
    }
    Some(range.lerp((coordinate - track.start) / track.length()))
}

/// Mapping state for one round. The range is swapped between rounds; the
/// track usually survives until the host re-lays out the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMapper {
    range: Range,
    track: Track,
}

impl RangeMapper {
    pub fn new(range: Range, track: Track) -> Self {
        RangeMapper { range, track }
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Replace the range for the next round.
    pub fn set_range(&mut self, range: Range) {
        self.range = range;
    }

    pub fn set_track(&mut self, track: Track) {
        self.track = track;
    }

    pub fn to_coordinate(&self, value: f64) -> f64 {
        to_coordinate(value, &self.range, &self.track)
    }

    pub fn to_value(&self, coordinate: f64) -> Option<f64> {
        to_value(coordinate, &self.range, &self.track)
    }

    /// Like [`RangeMapper::to_value`], but clamps the result into the range.
    pub fn to_value_clamped(&self, coordinate: f64) -> Option<f64> {
        self.to_value(coordinate).map(|v| self.range.clamp(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn range(start: f64, end: f64) -> Range {
        Range::new(start, end).expect("valid range")
    }

    #[test]
    fn maps_endpoints_to_track_ends() {
        let m = RangeMapper::new(range(-5.0, 5.0), Track::new(100.0, 700.0));
        assert_abs_diff_eq!(m.to_coordinate(-5.0), 100.0);
        assert_abs_diff_eq!(m.to_coordinate(5.0), 700.0);
        assert_abs_diff_eq!(m.to_coordinate(0.0), 400.0);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let ranges = [
            range(0.0, 1.0),
            range(-3.5, 12.25),
            range(100.0, -100.0),
            range(0.0, 1.0 / 3.0),
        ];
        let tracks = [Track::new(0.0, 800.0), Track::new(640.0, 40.0), Track::new(12.5, 13.0)];
        for r in &ranges {
            for t in &tracks {
                for i in 0..=40 {
                    let v = r.lerp(i as f64 / 40.0);
                    let back = to_value(to_coordinate(v, r, t), r, t).expect("track has length");
                    assert_abs_diff_eq!(back, v, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn values_outside_range_extrapolate() {
        let m = RangeMapper::new(range(0.0, 10.0), Track::new(0.0, 100.0));
        assert_abs_diff_eq!(m.to_coordinate(12.0), 120.0);
        assert_abs_diff_eq!(m.to_value(-10.0).unwrap(), -1.0);
        assert_abs_diff_eq!(m.to_value_clamped(-10.0).unwrap(), 0.0);
        assert_abs_diff_eq!(m.to_value_clamped(250.0).unwrap(), 10.0);
    }

    #[test]
    fn degenerate_track_has_no_inverse() {
        let m = RangeMapper::new(range(0.0, 1.0), Track::new(50.0, 50.0));
        assert_eq!(m.to_value(50.0), None);
        assert_abs_diff_eq!(m.to_coordinate(0.7), 50.0);
    }

    #[test]
    fn range_is_replaceable_between_rounds() {
        let mut m = RangeMapper::new(range(0.0, 1.0), Track::new(0.0, 100.0));
        assert_abs_diff_eq!(m.to_value(25.0).unwrap(), 0.25);
        m.set_range(range(0.0, 4.0));
        assert_abs_diff_eq!(m.to_value(25.0).unwrap(), 1.0);
    }
}
