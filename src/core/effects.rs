//! Keywords, targets and ongoing effects

use crate::core::{CardId, EffectId, GameEntity, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword abilities that matter to combat and blocking decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    /// Any positive damage dealt by this unit is lethal
    Lethal,
    /// Absorbs the first damage instance dealt to this unit
    Shield,
    /// Can only be blocked by Flying or Reach units
    Flying,
    /// Can block Flying units
    Reach,
    /// Can't attack
    Defender,
    /// Can't block
    CantBlock,

    // Catch-all for keywords the planner doesn't interpret
    Other(String),
}

/// Something a card can be aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Unit(CardId),
    Player(PlayerId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Unit(id) => write!(f, "unit {id}"),
            Target::Player(id) => write!(f, "player {id}"),
        }
    }
}

/// Legal targets for a card together with whether it may be played untargeted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRequirement {
    pub targets: Vec<Target>,
    pub mandatory: bool,
}

/// An effect already in play that its controller may pay to modify
///
/// `remaining_value` is what the effect is still worth if activated,
/// `magnitude` how strongly it acts per activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OngoingEffect {
    pub id: EffectId,
    pub name: String,
    pub owner: PlayerId,
    pub remaining_value: f64,
    pub modify_cost: u32,
    pub magnitude: f64,
}

impl GameEntity for OngoingEffect {
    fn id(&self) -> EffectId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
