//! Adaptive placement: a short branching diagnostic that picks a learner's starting level.
//!
//! `graph` holds the static, per-topic data; `walker` holds the only mutable state, a
//! current-node pointer owned by one learner session.

mod graph;
mod walker;

pub use graph::{
    Branch, DiagnosticGraph, DiagnosticNode, GraphValidationError, NodeIndex, PlacementLevel,
    DEFAULT_DIAGNOSTIC_ERROR_RATIO,
};
pub use walker::{run, PlacementError, PlacementOutcome, PlacementStep, PlacementWalker, WalkStep};

#[cfg(test)]
mod tests;
