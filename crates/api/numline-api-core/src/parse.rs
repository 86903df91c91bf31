//! Numeric text parsing.
//!
//! Grammar (tried in order, after trimming and dash normalization):
//!   percent  := decimal ws* '%'
//!   mixed    := sign? digits ws+ digits '/' digits
//!   fraction := sign? digits ws* '/' ws* digits
//!   decimal  := sign? (digits ('.' digits?)? | '.' digits)
//! Examples:
//!   "25%"   -> 0.25
//!   "2 1/2" -> 2.5
//!   "-3/4"  -> -0.75
//!   "–3"    -> -3 (en dash)
//!
//! Exponents, `inf`/`nan` spellings and anything else outside the grammar are
//! rejected with [`ParseError::InvalidSyntax`].

use thiserror::Error;

use crate::NumericInput;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid numeric syntax: {0:?}")]
    InvalidSyntax(String),
    #[error("division by zero")]
    DivisionByZero,
}

/// Part of a literal whose digit count is requested by [`digit_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionPart {
    Whole,
    Numerator,
    Denominator,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DecimalLit<'a> {
    text: &'a str,
    int_digits: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Literal<'a> {
    Percent(DecimalLit<'a>),
    Mixed {
        negative: bool,
        whole: &'a str,
        numerator: &'a str,
        denominator: &'a str,
    },
    Fraction {
        negative: bool,
        numerator: &'a str,
        denominator: &'a str,
    },
    Decimal(DecimalLit<'a>),
}

/// Parse a [`NumericInput`] into its canonical value.
///
/// Numbers pass through unchanged as long as they are finite.
pub fn parse(input: &NumericInput) -> Result<f64, ParseError> {
    match input {
        NumericInput::Number(n) if n.is_finite() => Ok(*n),
        NumericInput::Number(n) => Err(ParseError::InvalidSyntax(n.to_string())),
        NumericInput::Text(s) => parse_str(s),
    }
}

/// Parse numeric text according to the grammar described above.
pub fn parse_str(s: &str) -> Result<f64, ParseError> {
    let normalized = normalize(s);
    let literal = lex(&normalized).ok_or_else(|| ParseError::InvalidSyntax(s.to_string()))?;
    let value = evaluate(&literal).map_err(|err| match err {
        ParseError::InvalidSyntax(_) => ParseError::InvalidSyntax(s.to_string()),
        other => other,
    })?;
    if !value.is_finite() {
        return Err(ParseError::InvalidSyntax(s.to_string()));
    }
    Ok(value)
}

/// Number of digits in one part of `input`, for fixed-width entry masks.
///
/// Leading zeros do not count, an all-zero part counts as one digit and parts
/// that the literal does not have (the whole of a simple fraction, the
/// denominator of a decimal) report the minimum of one.
pub fn digit_count(input: &NumericInput, part: FractionPart) -> Result<usize, ParseError> {
    let text = match input {
        NumericInput::Number(n) if n.is_finite() => {
            return Ok(match part {
                FractionPart::Whole => significant_digits(&n.abs().trunc().to_string()),
                FractionPart::Numerator | FractionPart::Denominator => 1,
            });
        }
        NumericInput::Number(n) => return Err(ParseError::InvalidSyntax(n.to_string())),
        NumericInput::Text(s) => s,
    };

    let normalized = normalize(text);
    let literal = lex(&normalized).ok_or_else(|| ParseError::InvalidSyntax(text.clone()))?;
    let digits = match (literal, part) {
        (
            Literal::Mixed {
                whole: digits, ..
            },
            FractionPart::Whole,
        )
        | (
            Literal::Mixed {
                numerator: digits, ..
            }
            | Literal::Fraction {
                numerator: digits, ..
            },
            FractionPart::Numerator,
        )
        | (
            Literal::Mixed {
                denominator: digits,
                ..
            }
            | Literal::Fraction {
                denominator: digits,
                ..
            },
            FractionPart::Denominator,
        ) => digits,
        (Literal::Percent(lit) | Literal::Decimal(lit), FractionPart::Whole) => lit.int_digits,
        _ => "",
    };
    Ok(significant_digits(digits))
}

fn significant_digits(digits: &str) -> usize {
    digits.trim_start_matches('0').len().max(1)
}

/// Trim and map typographic dashes onto ASCII minus.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            other => other,
        })
        .collect()
}

fn lex(s: &str) -> Option<Literal<'_>> {
    if let Some(body) = s.strip_suffix('%') {
        return scan_decimal(body.trim_end()).map(Literal::Percent);
    }
    if let Some(mixed) = scan_mixed(s) {
        return Some(mixed);
    }
    if let Some(fraction) = scan_fraction(s) {
        return Some(fraction);
    }
    scan_decimal(s).map(Literal::Decimal)
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn scan_decimal(s: &str) -> Option<DecimalLit<'_>> {
    let (_, unsigned) = split_sign(s);
    let int_digits = match unsigned.split_once('.') {
        Some((int, frac)) => {
            if int.is_empty() && frac.is_empty() {
                return None;
            }
            if !int.is_empty() && !is_digits(int) {
                return None;
            }
            if !frac.is_empty() && !is_digits(frac) {
                return None;
            }
            int
        }
        None if is_digits(unsigned) => unsigned,
        None => return None,
    };
    Some(DecimalLit { text: s, int_digits })
}

fn scan_mixed(s: &str) -> Option<Literal<'_>> {
    let (whole_part, rest) = s.split_once(char::is_whitespace)?;
    let (negative, whole) = split_sign(whole_part);
    if !is_digits(whole) {
        return None;
    }
    let (numerator, denominator) = rest.trim_start().split_once('/')?;
    if !is_digits(numerator) || !is_digits(denominator) {
        return None;
    }
    Some(Literal::Mixed {
        negative,
        whole,
        numerator,
        denominator,
    })
}

fn scan_fraction(s: &str) -> Option<Literal<'_>> {
    let (numerator_part, denominator) = s.split_once('/')?;
    let (negative, numerator) = split_sign(numerator_part.trim_end());
    let denominator = denominator.trim_start();
    if !is_digits(numerator) || !is_digits(denominator) {
        return None;
    }
    Some(Literal::Fraction {
        negative,
        numerator,
        denominator,
    })
}

fn digits_value(digits: &str) -> Result<f64, ParseError> {
    digits
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidSyntax(digits.to_string()))
}

fn ratio(numerator: &str, denominator: &str) -> Result<f64, ParseError> {
    let den = digits_value(denominator)?;
    if den == 0.0 {
        return Err(ParseError::DivisionByZero);
    }
    Ok(digits_value(numerator)? / den)
}

fn evaluate(literal: &Literal<'_>) -> Result<f64, ParseError> {
    let signed = |negative: bool, v: f64| if negative { -v } else { v };
    match *literal {
        Literal::Percent(lit) => Ok(decimal_value(lit)? / 100.0),
        Literal::Mixed {
            negative,
            whole,
            numerator,
            denominator,
        } => {
            let fraction = ratio(numerator, denominator)?;
            Ok(signed(negative, digits_value(whole)?) + signed(negative, fraction))
        }
        Literal::Fraction {
            negative,
            numerator,
            denominator,
        } => Ok(signed(negative, ratio(numerator, denominator)?)),
        Literal::Decimal(lit) => decimal_value(lit),
    }
}

fn decimal_value(lit: DecimalLit<'_>) -> Result<f64, ParseError> {
    lit.text
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidSyntax(lit.text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integers_and_decimals() {
        assert_eq!(parse_str("7").unwrap(), 7.0);
        assert_eq!(parse_str("-3").unwrap(), -3.0);
        assert_eq!(parse_str("+2.5").unwrap(), 2.5);
        assert_eq!(parse_str(".5").unwrap(), 0.5);
        assert_eq!(parse_str("5.").unwrap(), 5.0);
        assert_eq!(parse_str("  0.125 ").unwrap(), 0.125);
    }

    #[test]
    fn parse_percent() {
        assert_eq!(parse_str("25%").unwrap(), 0.25);
        assert_eq!(parse_str("-50 %").unwrap(), -0.5);
        assert_eq!(parse_str("12.5%").unwrap(), 0.125);
        assert!(parse_str("%").is_err());
        assert!(parse_str("1/2%").is_err());
    }

    #[test]
    fn parse_mixed_fractions() {
        assert_eq!(parse_str("2 1/2").unwrap(), 2.5);
        assert_eq!(parse_str("-2 1/2").unwrap(), -2.5);
        assert_eq!(parse_str("1   3/4").unwrap(), 1.75);
        assert_eq!(parse_str("3 0/4").unwrap(), 3.0);
    }

    #[test]
    fn parse_simple_fractions() {
        assert_eq!(parse_str("3/4").unwrap(), 0.75);
        assert_eq!(parse_str("-1/4").unwrap(), -0.25);
        assert_eq!(parse_str("3 / 4").unwrap(), 0.75);
        assert!(parse_str("3/-4").is_err());
        assert!(parse_str("1.5/2").is_err());
    }

    #[test]
    fn parse_reports_division_by_zero() {
        assert_eq!(parse_str("5/0"), Err(ParseError::DivisionByZero));
        assert_eq!(parse_str("1 2/00"), Err(ParseError::DivisionByZero));
    }

    #[test]
    fn parse_normalizes_dashes() {
        assert_eq!(parse_str("\u{2013}3").unwrap(), -3.0);
        assert_eq!(parse_str("\u{2014}1/2").unwrap(), -0.5);
        assert_eq!(parse_str("\u{2212}10%").unwrap(), -0.1);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["abc", "", "   ", "1e3", "inf", "NaN", "--1", "1..2", "1/2/3", "2 1/", "½"] {
            assert!(
                matches!(parse_str(bad), Err(ParseError::InvalidSyntax(_))),
                "{bad:?} should be invalid"
            );
        }
    }

    #[test]
    fn parse_numeric_input_passthrough() {
        assert_eq!(parse(&NumericInput::Number(0.3)).unwrap(), 0.3);
        assert!(parse(&NumericInput::Number(f64::NAN)).is_err());
        assert!(parse(&NumericInput::Number(f64::INFINITY)).is_err());
        assert_eq!(parse(&NumericInput::Text("1/8".into())).unwrap(), 0.125);
    }

    #[test]
    fn digit_count_for_fraction_parts() {
        let mixed = NumericInput::from("12 3/100");
        assert_eq!(digit_count(&mixed, FractionPart::Whole).unwrap(), 2);
        assert_eq!(digit_count(&mixed, FractionPart::Numerator).unwrap(), 1);
        assert_eq!(digit_count(&mixed, FractionPart::Denominator).unwrap(), 3);

        let simple = NumericInput::from("7/16");
        assert_eq!(digit_count(&simple, FractionPart::Whole).unwrap(), 1);
        assert_eq!(digit_count(&simple, FractionPart::Denominator).unwrap(), 2);
    }

    #[test]
    fn digit_count_minimum_and_zeros() {
        assert_eq!(
            digit_count(&NumericInput::from("000/5"), FractionPart::Numerator).unwrap(),
            1
        );
        assert_eq!(
            digit_count(&NumericInput::from("007/5"), FractionPart::Numerator).unwrap(),
            1
        );
        assert_eq!(
            digit_count(&NumericInput::from("0.25"), FractionPart::Whole).unwrap(),
            1
        );
        assert_eq!(
            digit_count(&NumericInput::from("125.5"), FractionPart::Denominator).unwrap(),
            1
        );
        assert_eq!(
            digit_count(&NumericInput::Number(-340.2), FractionPart::Whole).unwrap(),
            3
        );
        assert!(digit_count(&NumericInput::from("x/y"), FractionPart::Whole).is_err());
    }

    #[test]
    fn digit_count_ignores_zero_denominator() {
        assert_eq!(
            digit_count(&NumericInput::from("5/0"), FractionPart::Denominator).unwrap(),
            1
        );
    }
}
