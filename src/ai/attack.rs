//! Attack planner
//!
//! A unit attacks only if no single untapped enemy unit could block it
//! favorably. This is a pessimistic worst-case check: multi-blocks are not
//! modeled, and one good blocker is enough to hold an attacker back.

use crate::ai::combat::{favorably_blocks, CombatStats};
use crate::ai::config::AiConfig;
use crate::core::CardId;
use crate::game::logger::AiLogger;
use crate::game::view::GameView;
use crate::Result;

/// A potential enemy blocker, valued once per planning pass
struct Defender {
    id: CardId,
    stats: CombatStats,
    value: f64,
}

pub struct AttackPlanner<'a> {
    config: &'a AiConfig,
    logger: &'a AiLogger,
}

impl<'a> AttackPlanner<'a> {
    pub fn new(config: &'a AiConfig, logger: &'a AiLogger) -> Self {
        AttackPlanner { config, logger }
    }

    /// Units that should be declared as attackers, in board order
    pub fn plan<V: GameView + ?Sized>(&self, view: &V) -> Result<Vec<CardId>> {
        let defenders = view
            .units(self.config.opponent)
            .into_iter()
            .filter(|&id| view.is_untapped(id))
            .map(|id| {
                Ok(Defender {
                    id,
                    stats: view.combat_stats(id)?,
                    value: view.removal_value(id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut attackers = Vec::new();
        let available = view.units(self.config.player);
        for &unit in &available {
            if !view.can_attack(unit) {
                continue;
            }
            let stats = view.combat_stats(unit)?;
            if stats.damage <= 0 {
                continue;
            }
            let value = view.removal_value(unit)?;

            let deterrent = defenders.iter().find(|d| {
                view.can_block(d.id, unit) && favorably_blocks(&stats, &d.stats, value, d.value)
            });
            match deterrent {
                Some(d) => self
                    .logger
                    .verbose(&format!("unit {unit} held back: unit {} blocks it favorably", d.id)),
                None => attackers.push(unit),
            }
        }

        if !attackers.is_empty() {
            self.logger.controller_choice(
                "ATTACK",
                &format!(
                    "chose {} attackers from {} available units",
                    attackers.len(),
                    available.len()
                ),
            );
        } else if !available.is_empty() {
            self.logger.controller_choice(
                "ATTACK",
                &format!("chose not to attack with {} available units", available.len()),
            );
        }

        Ok(attackers)
    }
}
