//! numline-api-core: canonical numeric values, ranges and labels (engine-agnostic).

pub mod format;
pub mod parse;
pub mod range;
pub mod value;

pub use format::{format_label, format_number, round_to, LabelStyle, LABEL_DECIMALS};
pub use parse::{digit_count, parse, parse_str, FractionPart, ParseError};
pub use range::{Range, RangeError, RangeSpec};
pub use value::{canonical, NumericInput};

/// Absolute tolerance used whenever two canonical values are compared for equality.
pub const VALUE_EPSILON: f64 = 1e-9;

/// Compare two canonical values using [`VALUE_EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= VALUE_EPSILON
}
