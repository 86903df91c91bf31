//! Step-wise traversal of a [`DiagnosticGraph`].

use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use super::graph::{Branch, DiagnosticGraph, DiagnosticNode, NodeIndex, PlacementLevel};
use crate::accuracy::normalized_error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("diagnostic graph has no nodes")]
    EmptyGraph,
    #[error("diagnostic node {0} does not exist")]
    UnknownNode(NodeIndex),
    #[error("diagnostic walk exceeded {0} steps")]
    StepLimitExceeded(usize),
    #[error("answer {0} is not a finite value")]
    InvalidAnswer(f64),
    #[error("diagnostic walk already finished")]
    Finished,
}

/// One answered node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementStep {
    pub node: NodeIndex,
    pub chosen: f64,
    pub error: f64,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementOutcome {
    pub level: PlacementLevel,
    /// Every level from 1 up to and including `level`.
    pub passed_levels: Vec<PlacementLevel>,
    pub history: Vec<PlacementStep>,
}

impl PlacementOutcome {
    fn new(level: PlacementLevel, history: Vec<PlacementStep>) -> Self {
        PlacementOutcome {
            level,
            passed_levels: (1..=level).collect(),
            history,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WalkStep {
    /// Present this node next.
    Continue(NodeIndex),
    Placed(PlacementOutcome),
}

/// Current-node pointer for one learner's walk. The graph itself is borrowed per call,
/// so many walkers can share one static graph.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementWalker {
    current: NodeIndex,
    steps: usize,
    history: Vec<PlacementStep>,
    finished: bool,
}

impl PlacementWalker {
    /// Start at the graph's entry node.
    pub fn new(graph: &DiagnosticGraph) -> Result<Self, PlacementError> {
        Self::starting_at(graph, graph.start)
    }

    pub fn starting_at(graph: &DiagnosticGraph, start: NodeIndex) -> Result<Self, PlacementError> {
        if graph.is_empty() {
            return Err(PlacementError::EmptyGraph);
        }
        if graph.node(start).is_none() {
            return Err(PlacementError::UnknownNode(start));
        }
        Ok(PlacementWalker {
            current: start,
            steps: 0,
            history: Vec::new(),
            finished: false,
        })
    }

    pub fn current(&self) -> NodeIndex {
        self.current
    }

    pub fn current_node<'g>(&self, graph: &'g DiagnosticGraph) -> Option<&'g DiagnosticNode> {
        if self.finished {
            return None;
        }
        graph.node(self.current)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn history(&self) -> &[PlacementStep] {
        &self.history
    }

    /// Record the learner's value for the current node and follow the matching branch.
    pub fn answer(
        &mut self,
        graph: &DiagnosticGraph,
        chosen: f64,
    ) -> Result<WalkStep, PlacementError> {
        if self.finished {
            return Err(PlacementError::Finished);
        }
        if !chosen.is_finite() {
            return Err(PlacementError::InvalidAnswer(chosen));
        }
        let node = graph
            .node(self.current)
            .ok_or(PlacementError::UnknownNode(self.current))?;

        let error = normalized_error(chosen, node.target, &node.range);
        let correct = error <= node.acceptable_error_ratio;
        let branch = if correct {
            node.on_correct
        } else {
            node.on_incorrect
        };
        // Fail on a dangling branch before recording anything.
        if let Branch::Node(next) = branch {
            if graph.node(next).is_none() {
                return Err(PlacementError::UnknownNode(next));
            }
        }

        self.steps += 1;
        self.history.push(PlacementStep {
            node: self.current,
            chosen,
            error,
            correct,
        });
        debug!(
            "placement: node {} answered {} (error {:.4}, correct {}) -> {:?}",
            self.current, chosen, error, correct, branch
        );

        match branch {
            Branch::Node(next) => {
                if self.steps >= graph.step_ceiling() {
                    warn!(
                        "placement: step ceiling {} reached at node {}",
                        graph.step_ceiling(),
                        self.current
                    );
                    self.finished = true;
                    return Err(PlacementError::StepLimitExceeded(self.steps));
                }
                self.current = next;
                Ok(WalkStep::Continue(next))
            }
            Branch::Level(level) => {
                self.finished = true;
                info!(
                    "placement: placed at level {} after {} answers",
                    level, self.steps
                );
                let history = std::mem::take(&mut self.history);
                Ok(WalkStep::Placed(PlacementOutcome::new(level, history)))
            }
        }
    }
}

/// Run a whole diagnostic, asking `answer_fn` for the learner's value at each node.
///
/// `answer_fn` is the suspension point: it may block on the learner, replay a script, or
/// consult a model. Hosts that cannot block should drive [`PlacementWalker`] directly.
pub fn run<F>(graph: &DiagnosticGraph, mut answer_fn: F) -> Result<PlacementOutcome, PlacementError>
where
    F: FnMut(NodeIndex, &DiagnosticNode) -> f64,
{
    let mut walker = PlacementWalker::new(graph)?;
    loop {
        let index = walker.current();
        let node = graph
            .node(index)
            .ok_or(PlacementError::UnknownNode(index))?;
        let chosen = answer_fn(index, node);
        if let WalkStep::Placed(outcome) = walker.answer(graph, chosen)? {
            return Ok(outcome);
        }
    }
}
