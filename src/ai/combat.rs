//! Combat outcome classification
//!
//! Simulates one simultaneous damage exchange between an attacker and a
//! single blocker. Used by both the attack and block planners.

use crate::core::Card;
use serde::{Deserialize, Serialize};

/// Combat-relevant snapshot of one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub damage: i32,
    pub life: i32,
    /// Any positive damage this unit deals is lethal
    pub lethal: bool,
    /// The first damage instance this unit takes is absorbed
    pub shield: bool,
}

impl CombatStats {
    pub fn new(damage: i32, life: i32) -> Self {
        CombatStats {
            damage,
            life,
            lethal: false,
            shield: false,
        }
    }

    pub fn with_lethal(mut self) -> Self {
        self.lethal = true;
        self
    }

    pub fn with_shield(mut self) -> Self {
        self.shield = true;
        self
    }

    pub fn from_card(card: &Card) -> Self {
        CombatStats {
            damage: card.power,
            life: card.life,
            lethal: card.is_lethal(),
            shield: card.has_shield(),
        }
    }
}

/// Result of one attacker/blocker exchange
///
/// Ordered from best to worst for the defending side, so the rank doubles as
/// a sort key when choosing blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutcomeCategory {
    AttackerDies,
    NeitherDies,
    BothDie,
    BlockerDies,
}

impl OutcomeCategory {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Damage bookkeeping for one unit during an exchange
struct Combatant {
    life: i32,
    shield: bool,
    dead: bool,
}

impl Combatant {
    fn new(stats: &CombatStats) -> Self {
        Combatant {
            life: stats.life,
            shield: stats.shield,
            dead: false,
        }
    }

    fn take_hit(&mut self, amount: i32, lethal: bool) {
        if amount <= 0 {
            return;
        }
        if self.shield {
            self.shield = false;
            return;
        }
        self.life -= amount;
        if lethal || self.life <= 0 {
            self.dead = true;
        }
    }
}

/// Classify the exchange when `blocker` blocks `attacker`
pub fn classify(attacker: &CombatStats, blocker: &CombatStats) -> OutcomeCategory {
    let mut att = Combatant::new(attacker);
    let mut blk = Combatant::new(blocker);

    // Damage is simultaneous: both hits are computed from the pre-combat stats.
    blk.take_hit(attacker.damage, attacker.lethal);
    att.take_hit(blocker.damage, blocker.lethal);

    match (att.dead, blk.dead) {
        (true, true) => OutcomeCategory::BothDie,
        (true, false) => OutcomeCategory::AttackerDies,
        (false, true) => OutcomeCategory::BlockerDies,
        (false, false) => OutcomeCategory::NeitherDies,
    }
}

/// Whether the defender would happily make this block
///
/// Trades only count as favorable when the blocker is valued strictly above
/// the attacker in the removal context.
pub fn is_favorable_block(outcome: OutcomeCategory, attacker_value: f64, blocker_value: f64) -> bool {
    match outcome {
        OutcomeCategory::AttackerDies | OutcomeCategory::NeitherDies => true,
        OutcomeCategory::BothDie => blocker_value > attacker_value,
        OutcomeCategory::BlockerDies => false,
    }
}

pub fn favorably_blocks(
    attacker: &CombatStats,
    blocker: &CombatStats,
    attacker_value: f64,
    blocker_value: f64,
) -> bool {
    is_favorable_block(classify(attacker, blocker), attacker_value, blocker_value)
}
