//! Display labels for tick values.

use serde::{Deserialize, Serialize};

/// Decimal places kept when rounding generated values and labels.
pub const LABEL_DECIMALS: i32 = 5;

/// How a topic renders values on the number line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    #[default]
    Decimal,
    /// Values are fractions of one, shown as `value·100%`.
    Percent,
}

/// Round `value` to `decimals` places, folding negative zero into zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest decimal rendering of `value` after rounding to [`LABEL_DECIMALS`].
pub fn format_number(value: f64) -> String {
    round_to(value, LABEL_DECIMALS).to_string()
}

/// Label text for `value` in the given style. Only the text changes; callers
/// keep comparing against the raw value.
pub fn format_label(value: f64, style: LabelStyle) -> String {
    match style {
        LabelStyle::Decimal => format_number(value),
        LabelStyle::Percent => format!("{}%", format_number(value * 100.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_labels_are_short() {
        assert_eq!(format_label(1.0, LabelStyle::Decimal), "1");
        assert_eq!(format_label(0.35000000000000003, LabelStyle::Decimal), "0.35");
        assert_eq!(format_label(-0.000001, LabelStyle::Decimal), "0");
        assert_eq!(format_label(-2.5, LabelStyle::Decimal), "-2.5");
        assert_eq!(format_label(1.0 / 3.0, LabelStyle::Decimal), "0.33333");
    }

    #[test]
    fn percent_labels_scale_by_hundred() {
        assert_eq!(format_label(0.35, LabelStyle::Percent), "35%");
        assert_eq!(format_label(0.125, LabelStyle::Percent), "12.5%");
        assert_eq!(format_label(1.0, LabelStyle::Percent), "100%");
    }

    #[test]
    fn round_to_folds_negative_zero() {
        let r = round_to(-0.000001, 5);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }
}
