//! Action evaluator: turns playable cards and modifiable effects into
//! scored, costed candidate actions
//!
//! Evaluation failures are isolated per candidate: a card whose valuation
//! errors becomes a zero-score placeholder and planning continues. Only the
//! structural failures (`AiError::is_fatal`) abort the cycle.

use crate::ai::candidate::{ActionKind, CandidateAction};
use crate::ai::target::{best_target, TargetChoice};
use crate::core::{CardId, EntityId, OngoingEffect, PlayerId, Target};
use crate::game::logger::AiLogger;
use crate::game::view::{EvalContext, GameView};
use crate::{AiError, Result};

pub struct ActionEvaluator<'a> {
    player: PlayerId,
    logger: &'a AiLogger,
}

impl<'a> ActionEvaluator<'a> {
    pub fn new(player: PlayerId, logger: &'a AiLogger) -> Self {
        ActionEvaluator { player, logger }
    }

    /// Evaluate every playable card in hand and every affordable effect
    pub fn evaluate<V: GameView + ?Sized>(&self, view: &V) -> Result<Vec<CandidateAction>> {
        let budget = view.budget(self.player);
        let mut candidates = Vec::new();

        for card in view.hand(self.player) {
            if !view.is_playable(card) {
                continue;
            }
            let candidate = match self.evaluate_card(view, card) {
                Ok(candidate) => candidate,
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    self.logger
                        .warn(&format!("evaluation of card {card} failed: {err}"));
                    CandidateAction::placeholder(ActionKind::PlayCard {
                        card,
                        target: None,
                        host: None,
                    })
                }
            };
            self.logger.verbose(&format!("candidate: {candidate}"));
            candidates.push(candidate);
        }

        for effect_id in view.modifiable_effects(self.player) {
            let effect = match view.effect(effect_id) {
                Ok(effect) => effect,
                Err(err) => {
                    self.logger
                        .warn(&format!("lookup of effect {effect_id} failed: {err}"));
                    candidates.push(CandidateAction::placeholder(ActionKind::ModifyEffect {
                        effect: effect_id,
                    }));
                    continue;
                }
            };
            if effect.modify_cost > budget {
                continue;
            }
            let candidate = match evaluate_effect(&effect) {
                Ok(candidate) => candidate,
                Err(err) => {
                    self.logger
                        .warn(&format!("evaluation of effect {effect_id} failed: {err}"));
                    CandidateAction::placeholder(ActionKind::ModifyEffect { effect: effect_id })
                }
            };
            self.logger.verbose(&format!("candidate: {candidate}"));
            candidates.push(candidate);
        }

        Ok(candidates)
    }

    /// Score = card value as a play candidate + incremental target score
    pub fn evaluate_card<V: GameView + ?Sized>(&self, view: &V, card: CardId) -> Result<CandidateAction> {
        let base = finite(card, view.evaluate_card(card, EvalContext::PlayCandidate)?)?;
        let cost = view.card_cost(card)?;
        let choice = self.choose_target(view, card)?;
        let host = self.choose_host(view, card)?;

        let score = finite(card, base + choice.score)?;
        Ok(CandidateAction::new(
            ActionKind::PlayCard {
                card,
                target: choice.target,
                host,
            },
            score,
            cost,
        ))
    }

    fn choose_target<V: GameView + ?Sized>(&self, view: &V, card: CardId) -> Result<TargetChoice<Target>> {
        let Some(requirement) = view.target_requirement(card)? else {
            return Ok(TargetChoice::none());
        };
        if requirement.targets.is_empty() {
            if requirement.mandatory {
                return Err(AiError::NoValidTarget(card.as_u32()));
            }
            return Ok(TargetChoice::none());
        }

        let best = best_target(&requirement.targets, |target| view.target_score(card, target))?;
        if !requirement.mandatory && best.score <= 0.0 {
            // Not worth aiming anywhere; value the card on its own.
            return Ok(TargetChoice::none());
        }
        Ok(best)
    }

    fn choose_host<V: GameView + ?Sized>(&self, view: &V, card: CardId) -> Result<Option<CardId>> {
        let Some(hosts) = view.eligible_hosts(card)? else {
            return Ok(None);
        };
        let best = best_target(&hosts, |host| {
            view.host_multiplier(card, host, EvalContext::NonLethalRemoval)
        })?;
        match best.target {
            Some(host) => Ok(Some(host)),
            None => Err(AiError::NoEligibleHost(card.as_u32())),
        }
    }
}

/// Cost efficiency: remaining value per unit of (cost x magnitude)
pub fn evaluate_effect(effect: &OngoingEffect) -> Result<CandidateAction> {
    let denominator = effect.modify_cost as f64 * effect.magnitude;
    let score = if denominator > 0.0 {
        effect.remaining_value / denominator
    } else {
        effect.remaining_value
    };
    let score = finite(effect.id, score)?;
    Ok(CandidateAction::new(
        ActionKind::ModifyEffect { effect: effect.id },
        score,
        effect.modify_cost,
    ))
}

fn finite(id: EntityId, score: f64) -> Result<f64> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(AiError::Evaluation(id.as_u32(), format!("non-finite score {score}")))
    }
}
