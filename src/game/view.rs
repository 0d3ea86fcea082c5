//! Interface between the decision engine and the rules engine
//!
//! The engine never owns game state. It inspects the game through
//! [`GameView`] and changes it only through [`GameActions`], one commit at a
//! time. Any rules engine (or the in-memory [`Table`](crate::game::Table)
//! used by tests) implements both traits.

use crate::ai::combat::CombatStats;
use crate::core::{CardId, EffectId, OngoingEffect, PlayerId, Target, TargetRequirement};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision opportunities the engine is asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Resource,
    Main,
    Attack,
    Block,
    End,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Resource => "resource",
            Phase::Main => "main",
            Phase::Attack => "attack",
            Phase::Block => "block",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

/// Context a card or unit is valued in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvalContext {
    /// Card in hand considered for playing now
    PlayCandidate,
    /// Unit considered as something to remove (or lose)
    Removal,
    /// Unit valued as if it would survive being targeted
    NonLethalRemoval,
}

/// Read-only queries against the current game state
pub trait GameView {
    fn phase(&self) -> Phase;

    /// Resources `player` can still spend this turn
    fn budget(&self, player: PlayerId) -> u32;

    fn life(&self, player: PlayerId) -> i32;

    fn hand(&self, player: PlayerId) -> Vec<CardId>;

    /// Units `player` controls on the board
    fn units(&self, player: PlayerId) -> Vec<CardId>;

    /// Attackers declared against the defending player this combat
    fn declared_attackers(&self) -> Vec<CardId>;

    /// Ongoing effects `player` may modify
    fn modifiable_effects(&self, player: PlayerId) -> Vec<EffectId>;

    fn effect(&self, effect: EffectId) -> Result<OngoingEffect>;

    fn is_playable(&self, card: CardId) -> bool;

    fn card_cost(&self, card: CardId) -> Result<u32>;

    fn evaluate_card(&self, card: CardId, context: EvalContext) -> Result<f64>;

    /// `None` when the card takes no target
    fn target_requirement(&self, card: CardId) -> Result<Option<TargetRequirement>>;

    /// Incremental value of playing `card` at `target`
    fn target_score(&self, card: CardId, target: Target) -> Result<f64>;

    /// `None` when the card doesn't attach to anything
    fn eligible_hosts(&self, card: CardId) -> Result<Option<Vec<CardId>>>;

    /// How much more `card` is worth when attached to `host`
    fn host_multiplier(&self, card: CardId, host: CardId, context: EvalContext) -> Result<f64>;

    fn combat_stats(&self, unit: CardId) -> Result<CombatStats>;

    fn can_attack(&self, unit: CardId) -> bool;

    fn can_block(&self, blocker: CardId, attacker: CardId) -> bool;

    /// Evasive units can't be blocked by ordinary units
    fn is_evasive(&self, unit: CardId) -> bool;

    fn is_untapped(&self, unit: CardId) -> bool;

    fn can_play_resource(&self, player: PlayerId) -> bool;

    /// Every card `player` is known to own
    fn known_pool(&self, player: PlayerId) -> Vec<CardId>;

    /// Value of `unit` as a removal target
    fn removal_value(&self, unit: CardId) -> Result<f64> {
        self.evaluate_card(unit, EvalContext::Removal)
    }
}

/// State-changing commits; each call fully applies before returning
pub trait GameActions {
    fn play_card(&mut self, card: CardId, target: Option<Target>, host: Option<CardId>) -> Result<()>;

    fn modify_effect(&mut self, effect: EffectId) -> Result<()>;

    fn declare_attacker(&mut self, unit: CardId) -> Result<()>;

    fn declare_blocker(&mut self, blocker: CardId, attacker: CardId) -> Result<()>;

    /// Spend this turn's resource play on `card`
    fn play_resource(&mut self, card: CardId) -> Result<()>;

    /// Answer a forced multi-select prompt
    fn submit_choice(&mut self, selection: &[CardId]) -> Result<()>;
}
