//! Range: the numeric interval shown on the track for one round.
//!
//! A range may run in either direction. "Before" and "after" always mean along
//! the track from `start` to `end`, which is ascending value order when
//! `start < end`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse::ParseError;
use crate::{approx_eq, NumericInput, VALUE_EPSILON};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("degenerate range: start and end are both {0}")]
    Degenerate(f64),
    #[error("range bounds must be finite")]
    NonFinite,
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Authored form of a range; bounds may be numbers or numeric text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSpec {
    pub start: NumericInput,
    pub end: NumericInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeSpec", into = "RangeSpec")]
pub struct Range {
    start: f64,
    end: f64,
}

impl Range {
    /// Build a range, rejecting `start == end` and non-finite bounds.
    pub fn new(start: f64, end: f64) -> Result<Self, RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::NonFinite);
        }
        if start == end {
            return Err(RangeError::Degenerate(start));
        }
        Ok(Range { start, end })
    }

    /// Parse both bounds and build the range.
    pub fn parse(start: &NumericInput, end: &NumericInput) -> Result<Self, RangeError> {
        Range::new(start.parse()?, end.parse()?)
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Signed length `end - start`; never zero.
    #[inline]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Position of `value` along the range: 0 at `start`, 1 at `end`.
    #[inline]
    pub fn fraction_of(&self, value: f64) -> f64 {
        (value - self.start) / self.span()
    }

    /// Value at position `t` along the range (inverse of [`Range::fraction_of`]).
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        self.start + t * self.span()
    }

    /// Closed-interval membership, with [`VALUE_EPSILON`] slack at the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() - VALUE_EPSILON && value <= self.max() + VALUE_EPSILON
    }

    /// Open-interval membership: strictly between the bounds.
    pub fn contains_open(&self, value: f64) -> bool {
        value > self.min() + VALUE_EPSILON && value < self.max() - VALUE_EPSILON
    }

    pub fn is_endpoint(&self, value: f64) -> bool {
        approx_eq(value, self.start) || approx_eq(value, self.end)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min(), self.max())
    }
}

impl TryFrom<RangeSpec> for Range {
    type Error = RangeError;

    fn try_from(spec: RangeSpec) -> Result<Self, Self::Error> {
        Range::parse(&spec.start, &spec.end)
    }
}

impl From<Range> for RangeSpec {
    fn from(range: Range) -> Self {
        RangeSpec {
            start: NumericInput::Number(range.start),
            end: NumericInput::Number(range.end),
        }
    }
}
