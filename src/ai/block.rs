//! Block planner
//!
//! Single greedy pass over the declared attackers, most threatening first.
//! Each attacker gets the best available matchup by (outcome rank, trade
//! score); the block is made only when it is needed to survive or when it is
//! at least an even trade. Earlier assignments are never reconsidered.

use crate::ai::combat::{classify, CombatStats, OutcomeCategory};
use crate::ai::config::AiConfig;
use crate::core::CardId;
use crate::game::logger::AiLogger;
use crate::game::view::GameView;
use crate::Result;
use serde::Serialize;

/// A classified attacker/blocker pairing from one planning pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockMatchup {
    pub attacker: CardId,
    pub blocker: CardId,
    pub outcome: OutcomeCategory,
    /// Blocker's removal value minus the attacker's
    pub trade_score: f64,
}

impl BlockMatchup {
    /// Lower is better for the defender
    pub fn key(&self, outcome_weight: f64) -> f64 {
        self.outcome.rank() as f64 * outcome_weight + self.trade_score
    }
}

/// Whether a chosen matchup is worth committing
///
/// Chump blocks are allowed once the damage still coming in is lethal.
pub fn should_commit(matchup: &BlockMatchup, incoming_damage: i64, life: i64) -> bool {
    incoming_damage >= life
        || matchup.outcome < OutcomeCategory::BothDie
        || (matchup.outcome == OutcomeCategory::BothDie && matchup.trade_score <= 0.0)
}

struct Combatant {
    id: CardId,
    stats: CombatStats,
    value: f64,
}

pub struct BlockPlanner<'a> {
    config: &'a AiConfig,
    logger: &'a AiLogger,
}

impl<'a> BlockPlanner<'a> {
    pub fn new(config: &'a AiConfig, logger: &'a AiLogger) -> Self {
        BlockPlanner { config, logger }
    }

    fn combatant<V: GameView + ?Sized>(&self, view: &V, id: CardId) -> Result<Combatant> {
        Ok(Combatant {
            id,
            stats: view.combat_stats(id)?,
            value: view.removal_value(id)?,
        })
    }

    /// Blocks to declare, in the order they were decided
    pub fn plan<V: GameView + ?Sized>(&self, view: &V) -> Result<Vec<BlockMatchup>> {
        let declared = view.declared_attackers();
        let mut attackers = declared
            .iter()
            .map(|&id| {
                let combatant = self.combatant(view, id)?;
                let mut threat = combatant.stats.damage as f64;
                if view.is_evasive(id) {
                    threat += self.config.evasion_bonus;
                }
                Ok((threat, combatant))
            })
            .collect::<Result<Vec<_>>>()?;
        attackers.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut pool = view
            .units(self.config.player)
            .into_iter()
            .filter(|&id| view.is_untapped(id))
            .map(|id| self.combatant(view, id))
            .collect::<Result<Vec<_>>>()?;

        let life = view.life(self.config.player) as i64;
        let mut incoming: i64 = attackers
            .iter()
            .map(|(_, a)| a.stats.damage.max(0) as i64)
            .sum();

        let mut blocks = Vec::new();
        for (_, attacker) in &attackers {
            let mut best: Option<(usize, BlockMatchup)> = None;
            for (pos, blocker) in pool.iter().enumerate() {
                if !view.can_block(blocker.id, attacker.id) {
                    continue;
                }
                let matchup = BlockMatchup {
                    attacker: attacker.id,
                    blocker: blocker.id,
                    outcome: classify(&attacker.stats, &blocker.stats),
                    trade_score: blocker.value - attacker.value,
                };
                self.logger.verbose(&format!(
                    "unit {} vs unit {}: {:?}, trade {:.1}",
                    blocker.id, attacker.id, matchup.outcome, matchup.trade_score
                ));
                let better = match &best {
                    None => true,
                    Some((_, current)) => {
                        matchup.key(self.config.outcome_weight) < current.key(self.config.outcome_weight)
                    }
                };
                if better {
                    best = Some((pos, matchup));
                }
            }

            let Some((pos, matchup)) = best else {
                continue;
            };
            if should_commit(&matchup, incoming, life) {
                pool.remove(pos);
                incoming -= attacker.stats.damage.max(0) as i64;
                blocks.push(matchup);
            }
        }

        if !blocks.is_empty() {
            self.logger.controller_choice(
                "BLOCK",
                &format!("chose {} blockers for {} attackers", blocks.len(), declared.len()),
            );
        } else if !declared.is_empty() {
            self.logger.controller_choice(
                "BLOCK",
                &format!("chose not to block {} attackers", declared.len()),
            );
        }

        Ok(blocks)
    }
}
