//! Decision entry point
//!
//! The environment calls [`AiPlayer::decide`] once per decision opportunity
//! and [`AiPlayer::on_choice`] whenever it needs a forced multi-select
//! answered. Both run to completion before returning.

use crate::ai::attack::AttackPlanner;
use crate::ai::block::{BlockMatchup, BlockPlanner};
use crate::ai::choice::{self, ChoiceCandidate, ChoiceContext, ChoicePrompt, HeuristicTag};
use crate::ai::config::AiConfig;
use crate::ai::sequencer::{ActionSequencer, SequenceReport};
use crate::core::CardId;
use crate::game::logger::AiLogger;
use crate::game::view::{GameActions, GameView, Phase};
use crate::Result;
use serde::Serialize;

/// What the engine did with one decision opportunity
#[derive(Debug, Clone, Serialize)]
pub enum Decision {
    /// Resource or main phase: optional resource play, then sequenced actions
    Actions {
        resource: Option<CardId>,
        sequence: SequenceReport,
    },
    Attack(Vec<CardId>),
    Block(Vec<BlockMatchup>),
    /// Nothing to decide in this phase
    Pass,
}

pub struct AiPlayer {
    config: AiConfig,
    logger: AiLogger,
}

impl AiPlayer {
    pub fn new(config: AiConfig) -> Self {
        AiPlayer {
            config,
            logger: AiLogger::new(),
        }
    }

    pub fn with_logger(config: AiConfig, logger: AiLogger) -> Self {
        AiPlayer { config, logger }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn logger(&self) -> &AiLogger {
        &self.logger
    }

    pub fn decide<G>(&self, game: &mut G) -> Result<Decision>
    where
        G: GameView + GameActions + ?Sized,
    {
        let phase = game.phase();
        self.logger.verbose(&format!("deciding in the {phase} phase"));

        match phase {
            Phase::Resource => {
                let resource = self.play_resource(game)?;
                let sequence = ActionSequencer::new(&self.config, &self.logger).run(game)?;
                Ok(Decision::Actions { resource, sequence })
            }
            Phase::Main => {
                let sequence = ActionSequencer::new(&self.config, &self.logger).run(game)?;
                Ok(Decision::Actions {
                    resource: None,
                    sequence,
                })
            }
            Phase::Attack => {
                let attackers = AttackPlanner::new(&self.config, &self.logger).plan(&*game)?;
                for &unit in &attackers {
                    game.declare_attacker(unit)?;
                }
                Ok(Decision::Attack(attackers))
            }
            Phase::Block => {
                let blocks = BlockPlanner::new(&self.config, &self.logger).plan(&*game)?;
                for block in &blocks {
                    game.declare_blocker(block.blocker, block.attacker)?;
                }
                Ok(Decision::Block(blocks))
            }
            Phase::End => Ok(Decision::Pass),
        }
    }

    /// Answer a forced multi-select and submit it immediately
    pub fn on_choice<G>(&self, game: &mut G, prompt: &ChoicePrompt) -> Result<Vec<CardId>>
    where
        G: GameView + GameActions + ?Sized,
    {
        let selection = self.resolve_choice(&*game, prompt)?;
        game.submit_choice(&selection)?;
        self.logger.controller_choice(
            "CHOICE",
            &format!("{:?} picked {:?} of {:?}", prompt.tag, selection, prompt.candidates),
        );
        Ok(selection)
    }

    /// Compute the answer to a prompt without submitting it
    pub fn resolve_choice<V: GameView + ?Sized>(&self, view: &V, prompt: &ChoicePrompt) -> Result<Vec<CardId>> {
        let candidates = prompt
            .candidates
            .iter()
            .map(|&card| self.choice_candidate(view, card))
            .collect::<Result<Vec<_>>>()?;
        let ctx = self.choice_context(view);

        let selection = choice::resolve(prompt.tag, &ctx, &candidates, prompt.min, prompt.max);
        if candidates.len() >= prompt.min && (selection.len() < prompt.min || selection.len() > prompt.max) {
            self.logger.warn(&format!(
                "{:?} heuristic picked {} cards, expected between {} and {}",
                prompt.tag,
                selection.len(),
                prompt.min,
                prompt.max
            ));
        }
        Ok(selection)
    }

    fn choice_candidate<V: GameView + ?Sized>(&self, view: &V, card: CardId) -> Result<ChoiceCandidate> {
        let stats = view.combat_stats(card)?;
        Ok(ChoiceCandidate {
            card,
            cost: view.card_cost(card)?,
            power: stats.damage,
            life: stats.life,
        })
    }

    fn choice_context<V: GameView + ?Sized>(&self, view: &V) -> ChoiceContext {
        // Cards that can't be priced are left out of the pool average.
        let pool_costs: Vec<u32> = view
            .known_pool(self.config.player)
            .into_iter()
            .filter_map(|card| view.card_cost(card).ok())
            .collect();
        ChoiceContext::with_pool(view.budget(self.config.player), &pool_costs)
    }

    /// Spend the resource play on the card least likely to be cast soon
    fn play_resource<G>(&self, game: &mut G) -> Result<Option<CardId>>
    where
        G: GameView + GameActions + ?Sized,
    {
        let player = self.config.player;
        if !game.can_play_resource(player) {
            return Ok(None);
        }
        let hand = game.hand(player);
        if hand.is_empty() {
            return Ok(None);
        }

        let prompt = ChoicePrompt {
            tag: HeuristicTag::Discard,
            candidates: hand,
            min: 1,
            max: 1,
        };
        let Some(&card) = self.resolve_choice(&*game, &prompt)?.first() else {
            return Ok(None);
        };

        game.play_resource(card)?;
        self.logger
            .controller_choice("RESOURCE", &format!("spent card {card} as a resource"));
        Ok(Some(card))
    }
}
