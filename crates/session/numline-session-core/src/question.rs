//! Question content: authored once as text or numbers, parsed once at load.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use numline_api_core::{NumericInput, Range};
use numline_core::{Marker, MarkerRequest, RoundConfig};

/// A question as authored. Every numeric field accepts either a JSON number or
/// numeric text such as `"3/4"`, `"1 1/2"` or `"25%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub start_point: NumericInput,
    pub end_point: NumericInput,
    #[serde(default)]
    pub markers: Vec<NumericInput>,
    pub target_value: NumericInput,
    /// Markers that keep their label. Absent means the round config decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_markers: Option<Vec<NumericInput>>,
}

impl QuestionSpec {
    pub fn new(
        start: impl Into<NumericInput>,
        end: impl Into<NumericInput>,
        target: impl Into<NumericInput>,
    ) -> Self {
        QuestionSpec {
            start_point: start.into(),
            end_point: end.into(),
            markers: Vec::new(),
            target_value: target.into(),
            visible_markers: None,
        }
    }

    pub fn with_markers<I, T>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NumericInput>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visible<I, T>(mut self, visible: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NumericInput>,
    {
        self.visible_markers = Some(visible.into_iter().map(Into::into).collect());
        self
    }
}

/// Parse a JSON array of questions.
pub fn parse_question_set(json: &str) -> Result<Vec<QuestionSpec>> {
    serde_json::from_str(json).context("question set json")
}

/// A question with every value in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub range: Range,
    pub markers: Vec<Marker>,
    pub visible: Vec<f64>,
    pub target: f64,
    pub start_label: Option<String>,
    pub end_label: Option<String>,
}

fn authored_label(input: &NumericInput) -> Option<String> {
    input
        .as_text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bound_or(input: &NumericInput, fallback: f64, which: &str) -> (f64, Option<String>) {
    match input.parse() {
        Ok(value) => (value, authored_label(input)),
        Err(err) => {
            warn!("question: {which} point {input} unusable ({err}); using {fallback}");
            (fallback, None)
        }
    }
}

impl Question {
    /// Parse authored content.
    ///
    /// A bad start or end bound falls back to 0 or 1, and a range that is still
    /// degenerate falls back to `[0, 1]`. Unparseable markers are dropped. Each
    /// substitution is logged. Only an unusable target is an error, since there
    /// is nothing to grade against.
    pub fn load(spec: &QuestionSpec) -> Result<Question> {
        let target = spec
            .target_value
            .parse()
            .with_context(|| format!("question target {}", spec.target_value))?;

        let (start, mut start_label) = bound_or(&spec.start_point, 0.0, "start");
        let (end, mut end_label) = bound_or(&spec.end_point, 1.0, "end");
        let range = match Range::new(start, end) {
            Ok(range) => range,
            Err(err) => {
                warn!("question: {err}; using [0, 1]");
                start_label = None;
                end_label = None;
                Range::new(0.0, 1.0)?
            }
        };

        let markers = spec
            .markers
            .iter()
            .filter_map(|input| match input.parse() {
                Ok(value) => Some(Marker {
                    value,
                    label: authored_label(input),
                }),
                Err(err) => {
                    warn!("question: dropping marker {input} ({err})");
                    None
                }
            })
            .collect();

        let visible = spec
            .visible_markers
            .iter()
            .flatten()
            .filter_map(|input| match input.parse() {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!("question: dropping visible marker {input} ({err})");
                    None
                }
            })
            .collect();

        if !range.contains(target) {
            warn!(
                "question: target {target} lies outside [{}, {}]",
                range.start(),
                range.end()
            );
        }

        Ok(Question {
            range,
            markers,
            visible,
            target,
            start_label,
            end_label,
        })
    }

    /// Tick request for this question, with the target as the hidden probe.
    pub fn marker_request(&self, config: &RoundConfig) -> MarkerRequest {
        MarkerRequest::new(self.range)
            .with_candidates(self.markers.iter().cloned())
            .with_visible(self.visible.iter().copied())
            .with_hidden_target(self.target)
            .with_intermediate_numbers(config.show_intermediate_numbers)
            .with_label_style(config.label_style)
            .with_endpoint_labels(self.start_label.clone(), self.end_label.clone())
    }
}
