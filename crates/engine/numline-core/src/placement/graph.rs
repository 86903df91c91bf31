//! Static diagnostic graph data and its structural checks.

use std::collections::VecDeque;

use hashbrown::HashSet;
use numline_api_core::{canonical, Range};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type NodeIndex = usize;
pub type PlacementLevel = u32;

/// Error ratio under which a diagnostic answer counts as correct.
pub const DEFAULT_DIAGNOSTIC_ERROR_RATIO: f64 = 0.1;

fn default_error_ratio() -> f64 {
    DEFAULT_DIAGNOSTIC_ERROR_RATIO
}

/// Where a diagnostic answer leads. Serializes as `{ "node": 3 }` or `{ "level": 2 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Node(NodeIndex),
    Level(PlacementLevel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticNode {
    #[serde(deserialize_with = "canonical")]
    pub target: f64,
    pub range: Range,
    #[serde(default = "default_error_ratio")]
    pub acceptable_error_ratio: f64,
    pub on_correct: Branch,
    pub on_incorrect: Branch,
}

impl DiagnosticNode {
    pub fn new(target: f64, range: Range, on_correct: Branch, on_incorrect: Branch) -> Self {
        DiagnosticNode {
            target,
            range,
            acceptable_error_ratio: DEFAULT_DIAGNOSTIC_ERROR_RATIO,
            on_correct,
            on_incorrect,
        }
    }

    pub fn branches(&self) -> [Branch; 2] {
        [self.on_correct, self.on_incorrect]
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphValidationError {
    #[error("diagnostic graph has no nodes")]
    Empty,
    #[error("start node {start} out of bounds for {len} nodes")]
    StartOutOfBounds { start: NodeIndex, len: usize },
    #[error("node {node} branches to missing node {target}")]
    DanglingReference { node: NodeIndex, target: NodeIndex },
    #[error("node {node} has invalid acceptable error ratio {ratio}")]
    InvalidErrorRatio { node: NodeIndex, ratio: f64 },
    #[error("node {node} target {target} lies outside its range")]
    TargetOutsideRange { node: NodeIndex, target: f64 },
    #[error("cycle detected among nodes {nodes:?}")]
    Cycle { nodes: Vec<NodeIndex> },
}

/// A topic's placement test: nodes addressed by index plus the entry node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagnosticGraph {
    #[serde(default)]
    pub start: NodeIndex,
    pub nodes: Vec<DiagnosticNode>,
}

impl DiagnosticGraph {
    pub fn new(start: NodeIndex, nodes: Vec<DiagnosticNode>) -> Self {
        DiagnosticGraph { start, nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&DiagnosticNode> {
        self.nodes.get(index)
    }

    /// Upper bound on answers in one walk.
    pub fn step_ceiling(&self) -> usize {
        self.nodes.len().saturating_mul(2)
    }

    /// Highest level any branch can place a learner at.
    pub fn max_level(&self) -> Option<PlacementLevel> {
        self.nodes
            .iter()
            .flat_map(|n| n.branches())
            .filter_map(|b| match b {
                Branch::Level(level) => Some(level),
                Branch::Node(_) => None,
            })
            .max()
    }

    /// Nodes reachable from `start` (ignores dangling edges).
    pub fn reachable(&self) -> HashSet<NodeIndex> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([self.start]);
        while let Some(index) = queue.pop_front() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if !seen.insert(index) {
                continue;
            }
            for branch in node.branches() {
                if let Branch::Node(next) = branch {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Structural checks for authored data: bounds, references, ratios and acyclicity.
    pub fn validate(&self) -> Result<(), GraphValidationError> {
        let len = self.nodes.len();
        if len == 0 {
            return Err(GraphValidationError::Empty);
        }
        if self.start >= len {
            return Err(GraphValidationError::StartOutOfBounds {
                start: self.start,
                len,
            });
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let ratio = node.acceptable_error_ratio;
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(GraphValidationError::InvalidErrorRatio { node: index, ratio });
            }
            if !node.range.contains(node.target) {
                return Err(GraphValidationError::TargetOutsideRange {
                    node: index,
                    target: node.target,
                });
            }
            for branch in node.branches() {
                if let Branch::Node(target) = branch {
                    if target >= len {
                        return Err(GraphValidationError::DanglingReference {
                            node: index,
                            target,
                        });
                    }
                }
            }
        }

        // Kahn's algorithm over node-to-node edges; anything left unvisited sits on or behind a cycle.
        let mut indeg = vec![0usize; len];
        for node in &self.nodes {
            for branch in node.branches() {
                if let Branch::Node(target) = branch {
                    indeg[target] += 1;
                }
            }
        }
        let mut queue: VecDeque<NodeIndex> = (0..len).filter(|&i| indeg[i] == 0).collect();
        let mut visited = 0usize;
        while let Some(index) = queue.pop_front() {
            visited += 1;
            for branch in self.nodes[index].branches() {
                if let Branch::Node(target) = branch {
                    indeg[target] -= 1;
                    if indeg[target] == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }
        if visited != len {
            let nodes = (0..len).filter(|&i| indeg[i] > 0).collect();
            return Err(GraphValidationError::Cycle { nodes });
        }
        Ok(())
    }
}
