//! NumericInput: authored numeric content as it arrives from question data.
//!
//! Content may carry either JSON numbers or strings (`"3/4"`, `"25%"`), so the
//! serde representation is untagged. Hosts parse it once via [`NumericInput::parse`]
//! and keep only the canonical `f64` afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse::{self, ParseError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parse into a canonical value.
    pub fn parse(&self) -> Result<f64, ParseError> {
        parse::parse(self)
    }

    /// Authored text, if this input was written as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NumericInput::Text(s) => Some(s.as_str()),
            NumericInput::Number(_) => None,
        }
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Number(0.0)
    }
}

impl From<f64> for NumericInput {
    fn from(v: f64) -> Self {
        NumericInput::Number(v)
    }
}

impl From<i32> for NumericInput {
    fn from(v: i32) -> Self {
        NumericInput::Number(f64::from(v))
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        NumericInput::Text(s)
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(n) => write!(f, "{n}"),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

/// Serde helper: deserialize a field written as number or numeric text straight
/// into its canonical `f64`.
///
/// ```ignore
/// #[serde(deserialize_with = "numline_api_core::value::canonical")]
/// pub target: f64,
/// ```
pub fn canonical<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let input = NumericInput::deserialize(deserializer)?;
    input.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_accepts_numbers_and_text() {
        let parsed: Vec<NumericInput> = serde_json::from_str(r#"[0.5, "3/4", 2]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                NumericInput::Number(0.5),
                NumericInput::Text("3/4".into()),
                NumericInput::Number(2.0),
            ]
        );
        assert_eq!(parsed[1].parse().unwrap(), 0.75);
        assert_eq!(parsed[1].as_text(), Some("3/4"));
        assert_eq!(parsed[0].as_text(), None);
    }

    #[test]
    fn canonical_helper_rejects_bad_text() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "canonical")]
            v: f64,
        }
        let ok: Holder = serde_json::from_str(r#"{ "v": "1 1/4" }"#).unwrap();
        assert_eq!(ok.v, 1.25);
        let err = serde_json::from_str::<Holder>(r#"{ "v": "1/0" }"#)
            .err()
            .expect("zero denominator should fail");
        assert!(err.to_string().contains("division by zero"));
    }
}
