//! Card types and definitions

use crate::core::{CardId, GameEntity, Keyword, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What a card does once played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    /// Enters the board as a unit
    Unit,
    /// Resolves immediately against its target
    Spell(SpellEffect),
    /// Attaches to a friendly unit and adds its stats to the host
    Attachment { power: i32, life: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpellEffect {
    /// Deal damage to an enemy unit or the opposing player
    Damage(i32),
    /// Permanently raise a friendly unit's stats
    Buff { power: i32, life: i32 },
}

/// A card instance, either in hand or on the board as a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub owner: PlayerId,
    pub kind: CardKind,

    /// Resource requirement to play this card
    #[serde(default)]
    pub cost: u32,

    #[serde(default)]
    pub power: i32,

    #[serde(default)]
    pub life: i32,

    #[serde(default)]
    pub keywords: SmallVec<[Keyword; 2]>,

    #[serde(default)]
    pub tapped: bool,

    /// Units that entered this turn can't attack yet
    #[serde(default)]
    pub summoning_sick: bool,

    /// Whether the card may be played without a target
    #[serde(default)]
    pub target_optional: bool,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>, owner: PlayerId, kind: CardKind) -> Self {
        Card {
            id,
            name: name.into(),
            owner,
            kind,
            cost: 0,
            power: 0,
            life: 0,
            keywords: SmallVec::new(),
            tapped: false,
            summoning_sick: false,
            target_optional: false,
        }
    }

    /// Convenience constructor for a unit with the given stats
    pub fn unit(id: CardId, name: impl Into<String>, owner: PlayerId, power: i32, life: i32) -> Self {
        let mut card = Card::new(id, name, owner, CardKind::Unit);
        card.power = power;
        card.life = life;
        card
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn has_keyword(&self, keyword: &Keyword) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn is_unit(&self) -> bool {
        matches!(self.kind, CardKind::Unit)
    }

    pub fn is_lethal(&self) -> bool {
        self.has_keyword(&Keyword::Lethal)
    }

    pub fn has_shield(&self) -> bool {
        self.has_keyword(&Keyword::Shield)
    }

    pub fn has_flying(&self) -> bool {
        self.has_keyword(&Keyword::Flying)
    }

    pub fn has_reach(&self) -> bool {
        self.has_keyword(&Keyword::Reach)
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }
}

impl GameEntity for Card {
    fn id(&self) -> CardId {
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
    fn test_card_creation() {
        let id = CardId::new(1);
        let owner = PlayerId::new(100);
        let card = Card::unit(id, "Grizzly Bears", owner, 2, 2).with_cost(2);

        assert_eq!(card.id, id);
        assert_eq!(card.name, "Grizzly Bears");
        assert_eq!(card.owner, owner);
        assert_eq!(card.cost, 2);
        assert!(card.is_unit());
        assert!(!card.tapped);
    }

    #[test]
    fn test_keywords() {
        let card = Card::unit(CardId::new(1), "Wasp", PlayerId::new(0), 1, 1)
            .with_keyword(Keyword::Flying)
            .with_keyword(Keyword::Lethal);

        assert!(card.has_flying());
        assert!(card.is_lethal());
        assert!(!card.has_shield());
        assert!(!card.has_reach());
    }

    #[test]
    fn test_card_from_json_defaults() {
        let json = r#"{"id": 7, "name": "Spark", "owner": 1, "kind": {"Spell": {"Damage": 2}}, "cost": 1}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.kind, CardKind::Spell(SpellEffect::Damage(2)));
        assert_eq!(card.cost, 1);
        assert!(card.keywords.is_empty());
        assert!(!card.target_optional);
    }
}
