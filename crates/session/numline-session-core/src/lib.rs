//! numline-session
//!
//! Host-facing layer over `numline-core`: one [`Session`] per learner. A session loads
//! question content, owns the current range and round config, reduces learner input and
//! grades it. Placement diagnostics run through [`DiagnosticSession`].

pub mod diagnostic;
pub mod input;
pub mod question;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Serialize;
use uuid::Uuid;

use numline_core::{
    classify, plan, plan_zoom, AccuracyThresholds, Classification, MarkerPlan, RangeMapper,
    RoundConfig, Track, WalkStep, ZoomPlan,
};

pub use crate::diagnostic::{DiagnosticSession, PlacementCatalog};
pub use crate::input::LearnerInput;
pub use crate::question::{parse_question_set, Question, QuestionSpec};

/// Result of grading one learner input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub chosen: f64,
    pub target: f64,
    pub classification: Classification,
    /// Track positions for drawing the learner's mark and the reveal.
    pub chosen_coordinate: f64,
    pub target_coordinate: f64,
}

/// The question currently on screen.
#[derive(Debug, Clone)]
pub struct Round {
    pub number: u32,
    pub question: Question,
    pub mapper: RangeMapper,
    pub plan: MarkerPlan,
    pub config: RoundConfig,
    pub thresholds: AccuracyThresholds,
    pub attempts: Vec<Feedback>,
}

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    config: RoundConfig,
    thresholds: AccuracyThresholds,
    track: Track,
    round: Option<Round>,
    rounds_played: u32,
    placement: Option<DiagnosticSession>,
}

impl Session {
    /// Create a session. Thresholds are validated here, not at grading time.
    pub fn new(config: RoundConfig, track: Track) -> Result<Self> {
        let thresholds = config.thresholds().context("invalid round config")?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            thresholds,
            track,
            round: None,
            rounds_played: 0,
            placement: None,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Replace the config. Takes effect from the next round; the round on screen
    /// keeps the plan and thresholds it started with.
    pub fn set_config(&mut self, config: RoundConfig) -> Result<()> {
        self.thresholds = config.thresholds().context("invalid round config")?;
        self.config = config;
        Ok(())
    }

    pub fn track(&self) -> Track {
        self.track
    }

    /// Re-layout: later coordinates use the new track.
    pub fn set_track(&mut self, track: Track) {
        self.track = track;
        if let Some(round) = self.round.as_mut() {
            round.mapper.set_track(track);
        }
        if let Some(placement) = self.placement.as_mut() {
            placement.set_track(track);
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Load a question and plan its ticks, replacing any round in progress.
    pub fn start_round(&mut self, spec: &QuestionSpec) -> Result<&MarkerPlan> {
        let question = Question::load(spec).context("loading question")?;
        Ok(self.start_question(question))
    }

    /// Start a round from an already loaded question.
    pub fn start_question(&mut self, question: Question) -> &MarkerPlan {
        let request = question.marker_request(&self.config);
        let plan = plan(&request);
        self.rounds_played += 1;
        debug!(
            "session {}: round {} on [{}, {}] with {} ticks",
            self.id,
            self.rounds_played,
            question.range.start(),
            question.range.end(),
            plan.ticks.len()
        );
        let round = self.round.insert(Round {
            number: self.rounds_played,
            mapper: RangeMapper::new(question.range, self.track),
            question,
            plan,
            config: self.config.clone(),
            thresholds: self.thresholds,
            attempts: Vec::new(),
        });
        &round.plan
    }

    /// Zoom scaffold leading to the current target.
    pub fn zoom_scaffold(&self) -> Result<ZoomPlan> {
        let round = self.active_round()?;
        Ok(plan_zoom(
            &round.question.range,
            round.question.target,
            round.config.label_style,
        ))
    }

    /// Grade one learner input against the current target.
    pub fn submit(&mut self, input: &LearnerInput) -> Result<Feedback> {
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| anyhow!("no round in progress"))?;
        let chosen = input.reduce(&round.mapper)?;
        let target = round.question.target;
        let classification = classify(chosen, target, &round.question.range, &round.thresholds);
        let feedback = Feedback {
            chosen,
            target,
            classification,
            chosen_coordinate: round.mapper.to_coordinate(chosen),
            target_coordinate: round.mapper.to_coordinate(target),
        };
        info!(
            "session {}: round {} answer {} -> {:?} ({:.1}%)",
            self.id,
            round.number,
            chosen,
            classification.outcome,
            classification.closeness_percent
        );
        round.attempts.push(feedback.clone());
        Ok(feedback)
    }

    /// Start the placement diagnostic for `topic`.
    pub fn begin_placement(&mut self, catalog: &PlacementCatalog, topic: &str) -> Result<()> {
        self.placement = Some(catalog.begin(topic, self.track)?);
        Ok(())
    }

    pub fn placement(&self) -> Option<&DiagnosticSession> {
        self.placement.as_ref()
    }

    pub fn answer_placement(&mut self, input: &LearnerInput) -> Result<WalkStep> {
        self.placement
            .as_mut()
            .ok_or_else(|| anyhow!("no placement diagnostic in progress"))?
            .answer(input)
    }

    fn active_round(&self) -> Result<&Round> {
        self.round
            .as_ref()
            .ok_or_else(|| anyhow!("no round in progress"))
    }
}
