//! Tick planning for the number line.
//!
//! The `markers` module turns a [`Range`] plus authored candidate values into the ordered
//! [`Tick`] list the host renders and exposes to assistive technology:
//!
//! - [`plan()`] builds a single tick sequence with endpoint ticks, labeled and
//!   unlabeled intermediates, and an optional hidden probe.
//! - [`plan_zoom()`] builds the one- or two-stage subdivision scaffold used by
//!   guided tutorials.
//!
//! Ticks are always ordered along the track from `range.start()` to `range.end()`.
//! Planning keeps no state between calls; the unlabeled-tick numbering is part of the
//! returned [`MarkerPlan`].

use numline_api_core::{LabelStyle, Range};
use serde::{Deserialize, Serialize};

mod plan;
mod zoom;

pub use plan::plan;
pub use zoom::{plan_zoom, subdivide, ZoomPlan, ZOOM_DECIMALS, ZOOM_SUBDIVISIONS};


/// A position on the line as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    /// Visible text, or `None` for an unlabeled tick or a probe.
    pub label: Option<String>,
    pub is_endpoint: bool,
    /// Occupies no pixels; exists only to keep assistive traversal in visual order.
    pub is_hidden_probe: bool,
    /// 1-based identifier of an unlabeled tick within its plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
}

impl Tick {
    pub fn endpoint(value: f64, label: String) -> Self {
        Tick {
            value,
            label: Some(label),
            is_endpoint: true,
            is_hidden_probe: false,
            ordinal: None,
        }
    }

    pub fn labeled(value: f64, label: String) -> Self {
        Tick {
            value,
            label: Some(label),
            is_endpoint: false,
            is_hidden_probe: false,
            ordinal: None,
        }
    }

    pub fn unlabeled(value: f64, ordinal: u32) -> Self {
        Tick {
            value,
            label: None,
            is_endpoint: false,
            is_hidden_probe: false,
            ordinal: Some(ordinal),
        }
    }

    pub fn probe(value: f64) -> Self {
        Tick {
            value,
            label: None,
            is_endpoint: false,
            is_hidden_probe: true,
            ordinal: None,
        }
    }
}

/// A candidate tick value, optionally with the text it was authored as (`"3/4"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Marker {
    pub fn new(value: f64) -> Self {
        Marker { value, label: None }
    }

    pub fn with_label(value: f64, label: impl Into<String>) -> Self {
        Marker {
            value,
            label: Some(label.into()),
        }
    }
}

impl From<f64> for Marker {
    fn from(value: f64) -> Self {
        Marker::new(value)
    }
}

/// Inputs to [`plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRequest {
    pub range: Range,
    pub candidates: Vec<Marker>,
    /// Values whose ticks carry a label. Empty means "decide by `show_intermediate_numbers`".
    pub visible: Vec<f64>,
    pub hidden_target: Option<f64>,
    pub show_intermediate_numbers: bool,
    pub label_style: LabelStyle,
    pub start_label: Option<String>,
    pub end_label: Option<String>,
}

impl MarkerRequest {
    pub fn new(range: Range) -> Self {
        MarkerRequest {
            range,
            candidates: Vec::new(),
            visible: Vec::new(),
            hidden_target: None,
            show_intermediate_numbers: false,
            label_style: LabelStyle::Decimal,
            start_label: None,
            end_label: None,
        }
    }

    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = impl Into<Marker>>) -> Self {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visible(mut self, visible: impl IntoIterator<Item = f64>) -> Self {
        self.visible = visible.into_iter().collect();
        self
    }

    pub fn with_hidden_target(mut self, target: f64) -> Self {
        self.hidden_target = Some(target);
        self
    }

    pub fn with_intermediate_numbers(mut self, show: bool) -> Self {
        self.show_intermediate_numbers = show;
        self
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    pub fn with_endpoint_labels(
        mut self,
        start: Option<String>,
        end: Option<String>,
    ) -> Self {
        self.start_label = start;
        self.end_label = end;
        self
    }
}

/// Output of [`plan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPlan {
    pub ticks: Vec<Tick>,
    /// Number of ordinals handed out; the last unlabeled tick has this ordinal.
    pub unlabeled_count: u32,
}

impl MarkerPlan {
    pub fn values(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.value).collect()
    }

    pub fn probe(&self) -> Option<(usize, &Tick)> {
        self.ticks.iter().enumerate().find(|(_, t)| t.is_hidden_probe)
    }

    /// Ticks that take up space on screen (everything but the probe).
    pub fn visible_ticks(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|t| !t.is_hidden_probe)
    }
}
