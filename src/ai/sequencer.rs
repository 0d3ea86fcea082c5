//! Action sequencer: commit one action, then replan
//!
//! Committing anything changes the game (budget spent, new units, new
//! targets), so the optimizer's subset is never executed wholesale. Each step
//! evaluates from scratch, runs the optimizer, commits the single best action
//! of the chosen subset and ends. The loop is bounded by
//! `AiConfig::max_steps` and stops as soon as no affordable positive action
//! remains.

use crate::ai::candidate::{ActionKind, CandidateAction};
use crate::ai::config::AiConfig;
use crate::ai::evaluator::ActionEvaluator;
use crate::ai::optimizer::select_actions;
use crate::core::PlayerId;
use crate::game::logger::AiLogger;
use crate::game::view::{GameActions, GameView, Phase};
use crate::Result;
use serde::Serialize;

/// Why a sequencer run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// No affordable action with a positive score remains
    Exhausted,
    /// `max_steps` commits were made
    StepLimit,
    /// The phase moved on under us
    PhaseChanged,
    /// The chosen action was no longer legal when its step came to commit
    StaleAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct SequenceReport {
    pub committed: Vec<CandidateAction>,
    /// Steps run, including a final one that stopped without committing
    pub steps: usize,
    pub stop: StopReason,
}

enum StepOutcome {
    Committed(CandidateAction),
    Stopped(StopReason),
}

pub struct ActionSequencer<'a> {
    config: &'a AiConfig,
    logger: &'a AiLogger,
}

impl<'a> ActionSequencer<'a> {
    pub fn new(config: &'a AiConfig, logger: &'a AiLogger) -> Self {
        ActionSequencer { config, logger }
    }

    pub fn run<G>(&self, game: &mut G) -> Result<SequenceReport>
    where
        G: GameView + GameActions + ?Sized,
    {
        let phase = game.phase();
        let evaluator = ActionEvaluator::new(self.config.player, self.logger);
        let mut committed = Vec::new();

        for step in 0..self.config.max_steps {
            match self.step(game, &evaluator, phase)? {
                StepOutcome::Committed(action) => committed.push(action),
                StepOutcome::Stopped(stop) => {
                    return Ok(SequenceReport {
                        committed,
                        steps: step + 1,
                        stop,
                    });
                }
            }
        }

        self.logger.warn(&format!(
            "sequencer hit the step limit of {} in the {} phase",
            self.config.max_steps, phase
        ));
        Ok(SequenceReport {
            committed,
            steps: self.config.max_steps,
            stop: StopReason::StepLimit,
        })
    }

    fn step<G>(&self, game: &mut G, evaluator: &ActionEvaluator<'_>, phase: Phase) -> Result<StepOutcome>
    where
        G: GameView + GameActions + ?Sized,
    {
        if game.phase() != phase {
            return Ok(StepOutcome::Stopped(StopReason::PhaseChanged));
        }

        let player = self.config.player;
        let budget = game.budget(player);
        let candidates = evaluator.evaluate(&*game)?;
        if !candidates.iter().any(|c| c.is_worth_playing(budget)) {
            return Ok(StepOutcome::Stopped(StopReason::Exhausted));
        }

        let selection = select_actions(&candidates, budget);
        let Some(best) = best_of(&candidates, &selection.indices) else {
            return Ok(StepOutcome::Stopped(StopReason::Exhausted));
        };

        if !is_still_legal(&*game, player, &best, budget) {
            self.logger
                .warn(&format!("skipping stale action: {}", best.kind));
            return Ok(StepOutcome::Stopped(StopReason::StaleAction));
        }

        commit(game, &best)?;
        self.logger.controller_choice("PLAN", &best.to_string());

        let remaining = game.budget(player);
        if budget.checked_sub(best.cost) != Some(remaining) {
            self.logger.warn(&format!(
                "budget went from {} to {} after committing an action costing {}",
                budget, remaining, best.cost
            ));
        }

        Ok(StepOutcome::Committed(best))
    }
}

/// Highest-scoring candidate among `indices`; the earliest wins ties
fn best_of(candidates: &[CandidateAction], indices: &[usize]) -> Option<CandidateAction> {
    let mut best: Option<CandidateAction> = None;
    for &i in indices {
        let candidate = candidates[i];
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

fn is_still_legal<V>(view: &V, player: PlayerId, action: &CandidateAction, budget: u32) -> bool
where
    V: GameView + ?Sized,
{
    if action.cost > budget {
        return false;
    }
    match action.kind {
        ActionKind::PlayCard { card, .. } => view.hand(player).contains(&card) && view.is_playable(card),
        ActionKind::ModifyEffect { effect } => view.modifiable_effects(player).contains(&effect),
    }
}

/// Apply one candidate through the commit interface
pub fn commit<G: GameActions + ?Sized>(game: &mut G, action: &CandidateAction) -> Result<()> {
    match action.kind {
        ActionKind::PlayCard { card, target, host } => game.play_card(card, target, host),
        ActionKind::ModifyEffect { effect } => game.modify_effect(effect),
    }
}
