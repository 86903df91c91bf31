//! numline-core: the number-line interaction engine.
//!
//! - [`mapper`] converts between values on a [`Range`] and track coordinates.
//! - [`markers`] plans tick sequences and zoom scaffolds.
//! - [`accuracy`] grades a chosen value against a target.
//! - [`placement`] walks a diagnostic graph to pick a starting level.
//! - [`config`] holds the per-round knobs supplied by the host.
//!
//! Everything except [`placement::PlacementWalker`] is a pure function of its arguments.

pub mod accuracy;
pub mod config;
pub mod mapper;
pub mod markers;
pub mod placement;

pub use accuracy::{classify, AccuracyThresholds, Classification, Outcome, ThresholdError};
pub use config::{ConfigError, RoundConfig};
pub use mapper::{RangeMapper, Track};
pub use markers::{plan, plan_zoom, Marker, MarkerPlan, MarkerRequest, Tick, ZoomPlan};
pub use placement::{
    run, Branch, DiagnosticGraph, DiagnosticNode, PlacementError, PlacementOutcome,
    PlacementWalker, WalkStep,
};

pub use numline_api_core::{LabelStyle, NumericInput, Range, RangeError};
