//! Immutable engine configuration

use crate::core::PlayerId;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_evasion_bonus() -> f64 {
    1000.0
}

fn default_outcome_weight() -> f64 {
    10_000.0
}

fn default_max_steps() -> usize {
    64
}

/// Settings fixed when an [`AiPlayer`](crate::ai::AiPlayer) is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// The player the engine decides for
    pub player: PlayerId,
    pub opponent: PlayerId,

    /// Added to an evasive attacker's damage so it is blocked first
    #[serde(default = "default_evasion_bonus")]
    pub evasion_bonus: f64,

    /// Multiplies the outcome rank in the block-matchup key; must dwarf any
    /// trade score so outcomes dominate valuations
    #[serde(default = "default_outcome_weight")]
    pub outcome_weight: f64,

    /// Upper bound on commits in one sequencer run
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl AiConfig {
    pub fn new(player: PlayerId, opponent: PlayerId) -> Self {
        AiConfig {
            player,
            opponent,
            evasion_bonus: default_evasion_bonus(),
            outcome_weight: default_outcome_weight(),
            max_steps: default_max_steps(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
