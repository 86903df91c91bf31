//! Placement diagnostics for a learner session.
//!
//! A [`PlacementCatalog`] holds one validated graph per topic. Graphs are immutable
//! and shared through `Arc`; each [`DiagnosticSession`] owns only its walker.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use hashbrown::HashMap;
use log::{debug, info};

use numline_core::placement::{DiagnosticNode, PlacementLevel};
use numline_core::{
    plan, DiagnosticGraph, LabelStyle, MarkerPlan, MarkerRequest, PlacementOutcome,
    PlacementWalker, RangeMapper, Track, WalkStep,
};

use crate::input::LearnerInput;

#[derive(Debug, Clone, Default)]
pub struct PlacementCatalog {
    graphs: HashMap<String, Arc<DiagnosticGraph>>,
}

impl PlacementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a topic's graph. The graph must pass validation.
    pub fn insert(&mut self, topic: impl Into<String>, graph: DiagnosticGraph) -> Result<()> {
        let topic = topic.into();
        graph
            .validate()
            .with_context(|| format!("diagnostic graph for topic '{topic}'"))?;
        debug!("catalog: registered '{}' with {} nodes", topic, graph.len());
        self.graphs.insert(topic, Arc::new(graph));
        Ok(())
    }

    /// Load a `{ "topic": graph, ... }` object.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, DiagnosticGraph> =
            serde_json::from_str(json).context("diagnostic catalog json")?;
        let mut catalog = Self::new();
        for (topic, graph) in raw {
            catalog.insert(topic, graph)?;
        }
        Ok(catalog)
    }

    pub fn get(&self, topic: &str) -> Option<Arc<DiagnosticGraph>> {
        self.graphs.get(topic).cloned()
    }

    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.graphs.keys().map(String::as_str).collect();
        topics.sort_unstable();
        topics
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Start a walk through `topic`'s graph.
    pub fn begin(&self, topic: &str, track: Track) -> Result<DiagnosticSession> {
        let graph = self
            .get(topic)
            .ok_or_else(|| anyhow!("no diagnostic graph for topic '{topic}'"))?;
        DiagnosticSession::new(topic, graph, track)
    }
}

/// One learner's progress through a diagnostic graph.
#[derive(Debug, Clone)]
pub struct DiagnosticSession {
    topic: String,
    graph: Arc<DiagnosticGraph>,
    walker: PlacementWalker,
    track: Track,
    outcome: Option<PlacementOutcome>,
}

impl DiagnosticSession {
    pub fn new(
        topic: impl Into<String>,
        graph: Arc<DiagnosticGraph>,
        track: Track,
    ) -> Result<Self> {
        let topic = topic.into();
        let walker = PlacementWalker::new(&graph)
            .with_context(|| format!("starting diagnostic for topic '{topic}'"))?;
        Ok(Self {
            topic,
            graph,
            walker,
            track,
            outcome: None,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_track(&mut self, track: Track) {
        self.track = track;
    }

    /// The node awaiting an answer, or `None` once placed.
    pub fn current_node(&self) -> Option<&DiagnosticNode> {
        self.walker.current_node(&self.graph)
    }

    /// Mapper for the current node's range on this session's track.
    pub fn mapper(&self) -> Option<RangeMapper> {
        self.current_node()
            .map(|node| RangeMapper::new(node.range, self.track))
    }

    /// Endpoint ticks for the current node, with its target as the hidden probe.
    pub fn current_plan(&self, style: LabelStyle) -> Option<MarkerPlan> {
        self.current_node().map(|node| {
            plan(
                &MarkerRequest::new(node.range)
                    .with_hidden_target(node.target)
                    .with_label_style(style),
            )
        })
    }

    pub fn answer(&mut self, input: &LearnerInput) -> Result<WalkStep> {
        let mapper = self
            .mapper()
            .ok_or_else(|| anyhow!("diagnostic for '{}' already finished", self.topic))?;
        let chosen = input.reduce(&mapper)?;
        let step = self
            .walker
            .answer(&self.graph, chosen)
            .with_context(|| format!("diagnostic for topic '{}'", self.topic))?;
        if let WalkStep::Placed(outcome) = &step {
            info!("diagnostic '{}': placed at level {}", self.topic, outcome.level);
            self.outcome = Some(outcome.clone());
        }
        Ok(step)
    }

    pub fn is_finished(&self) -> bool {
        self.walker.is_finished()
    }

    pub fn outcome(&self) -> Option<&PlacementOutcome> {
        self.outcome.as_ref()
    }

    pub fn level(&self) -> Option<PlacementLevel> {
        self.outcome.as_ref().map(|o| o.level)
    }

    /// Every level up to and including the placement; empty until placed.
    pub fn passed_levels(&self) -> &[PlacementLevel] {
        self.outcome
            .as_ref()
            .map(|o| o.passed_levels.as_slice())
            .unwrap_or(&[])
    }
}
