//! Core game types and entities

pub mod card;
pub mod effects;
pub mod entity;
pub mod player;

pub use card::{Card, CardKind, SpellEffect};
pub use effects::{Keyword, OngoingEffect, Target, TargetRequirement};
pub use entity::{CardId, EffectId, EntityId, EntityStore, GameEntity, PlayerId};
pub use player::Player;
