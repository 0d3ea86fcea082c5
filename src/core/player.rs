//! Player representation

use crate::core::{CardId, GameEntity, PlayerId};
use serde::{Deserialize, Serialize};

fn default_max_resource_plays() -> u8 {
    1
}

/// A player's public and private state as seen by the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub life: i32,

    /// Spendable resources for the current turn
    #[serde(default)]
    pub budget: u32,

    /// Cards in hand, in draw order
    #[serde(default)]
    pub hand: Vec<CardId>,

    /// Every card this player is known to own (hand, board and deck list)
    #[serde(default)]
    pub known_pool: Vec<CardId>,

    #[serde(default)]
    pub resource_plays_this_turn: u8,

    #[serde(default = "default_max_resource_plays")]
    pub max_resource_plays_per_turn: u8,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            budget: 0,
            hand: Vec::new(),
            known_pool: Vec::new(),
            resource_plays_this_turn: 0,
            max_resource_plays_per_turn: 1,
        }
    }

    pub fn lose_life(&mut self, amount: i32) {
        self.life -= amount;
    }

    /// Spend resources, failing without change if the budget is short
    pub fn spend(&mut self, amount: u32) -> bool {
        match self.budget.checked_sub(amount) {
            Some(rest) => {
                self.budget = rest;
                true
            }
            None => false,
        }
    }

    pub fn can_play_resource(&self) -> bool {
        self.resource_plays_this_turn < self.max_resource_plays_per_turn
    }

    pub fn play_resource(&mut self) {
        self.resource_plays_this_turn += 1;
        self.budget += 1;
    }

    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl GameEntity for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let id = PlayerId::new(1);
        let player = Player::new(id, "Alice", 20);

        assert_eq!(player.id, id);
        assert_eq!(player.name, "Alice");
        assert_eq!(player.life, 20);
        assert_eq!(player.budget, 0);
    }

    #[test]
    fn test_spend() {
        let mut player = Player::new(PlayerId::new(1), "Bob", 20);
        player.budget = 3;

        assert!(player.spend(2));
        assert_eq!(player.budget, 1);
        assert!(!player.spend(2));
        assert_eq!(player.budget, 1);
        assert!(player.spend(0));
    }

    #[test]
    fn test_resource_plays() {
        let mut player = Player::new(PlayerId::new(1), "Charlie", 20);

        assert!(player.can_play_resource());
        player.play_resource();
        assert!(!player.can_play_resource());
        assert_eq!(player.budget, 1);
    }
}
