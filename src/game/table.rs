//! In-memory two-player table
//!
//! A small, self-contained implementation of [`GameView`] and
//! [`GameActions`]: units, damage and buff spells, attachments and ongoing
//! effects. It enforces only the rules the engine's queries depend on and is
//! what the CLI, tests and benches drive the engine against.

use crate::ai::combat::CombatStats;
use crate::core::{
    Card, CardId, CardKind, EffectId, EntityStore, Keyword, OngoingEffect, Player, PlayerId, SpellEffect, Target,
    TargetRequirement,
};
use crate::game::view::{EvalContext, GameActions, GameView, Phase};
use crate::{AiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized board state a [`Table`] can be built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub players: Vec<Player>,
    /// Every card referenced by a hand, the board or a known pool
    pub cards: Vec<Card>,
    /// Units in play, in the order they entered
    #[serde(default)]
    pub board: Vec<CardId>,
    #[serde(default)]
    pub effects: Vec<OngoingEffect>,
    /// Attackers already declared, for snapshots taken in the block phase
    #[serde(default)]
    pub attackers: Vec<CardId>,
}

impl TableSnapshot {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Everything committed to the table, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommittedAction {
    PlayCard {
        card: CardId,
        target: Option<Target>,
        host: Option<CardId>,
    },
    ModifyEffect(EffectId),
    Attack(CardId),
    Block { blocker: CardId, attacker: CardId },
    Resource(CardId),
    Choice(Vec<CardId>),
}

#[derive(Debug, Clone)]
pub struct Table {
    phase: Phase,
    players: Vec<Player>,
    cards: EntityStore<Card>,
    board: Vec<CardId>,
    effects: Vec<OngoingEffect>,
    attackers: Vec<CardId>,
    blocks: Vec<(CardId, CardId)>,
    /// (attachment, host) pairs
    attachments: Vec<(CardId, CardId)>,
    history: Vec<CommittedAction>,
}

impl Table {
    pub fn new(phase: Phase, players: Vec<Player>) -> Self {
        Table {
            phase,
            players,
            cards: EntityStore::new(),
            board: Vec::new(),
            effects: Vec::new(),
            attackers: Vec::new(),
            blocks: Vec::new(),
            attachments: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Standard table: player 0 vs player 1, both at `life`
    pub fn two_player(phase: Phase, life: i32) -> Self {
        Table::new(
            phase,
            vec![
                Player::new(PlayerId::new(0), "Alice", life),
                Player::new(PlayerId::new(1), "Bob", life),
            ],
        )
    }

    pub fn from_snapshot(snapshot: TableSnapshot) -> Result<Self> {
        let mut table = Table::new(snapshot.phase, snapshot.players);
        table.cards = snapshot.cards.into_iter().collect();
        table.effects = snapshot.effects;

        for player in &table.players {
            for &card in player.hand.iter().chain(&player.known_pool) {
                table.cards.get(card)?;
            }
        }
        for &unit in snapshot.board.iter().chain(&snapshot.attackers) {
            if !table.cards.get(unit)?.is_unit() {
                return Err(AiError::InvalidAction(format!("card {unit} on the board is not a unit")));
            }
        }
        table.board = snapshot.board;
        table.attackers = snapshot.attackers;
        Ok(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Table::from_snapshot(TableSnapshot::load_from_file(path)?)
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(AiError::EntityNotFound(id.as_u32()))
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AiError::EntityNotFound(id.as_u32()))
    }

    pub fn get_other_player_id(&self, id: PlayerId) -> Option<PlayerId> {
        self.players.iter().map(|p| p.id).find(|&p| p != id)
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id)
    }

    pub fn board(&self) -> &[CardId] {
        &self.board
    }

    pub fn blocks(&self) -> &[(CardId, CardId)] {
        &self.blocks
    }

    pub fn attachments(&self) -> &[(CardId, CardId)] {
        &self.attachments
    }

    pub fn history(&self) -> &[CommittedAction] {
        &self.history
    }

    /// Put `card` into its owner's hand (and known pool)
    pub fn add_to_hand(&mut self, card: Card) -> Result<CardId> {
        let id = card.id;
        let player = self.get_player_mut(card.owner)?;
        player.hand.push(id);
        player.known_pool.push(id);
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Put a unit straight into play
    pub fn add_to_board(&mut self, card: Card) -> Result<CardId> {
        if !card.is_unit() {
            return Err(AiError::InvalidAction(format!("card {} is not a unit", card.id)));
        }
        let id = card.id;
        self.get_player_mut(card.owner)?.known_pool.push(id);
        self.cards.insert(id, card);
        self.board.push(id);
        Ok(id)
    }

    pub fn add_effect(&mut self, effect: OngoingEffect) {
        self.effects.push(effect);
    }

    /// Declare an attacker without rules checks, for setting up block scenarios
    pub fn force_attacker(&mut self, unit: CardId) -> Result<()> {
        self.cards.get_mut(unit)?.tap();
        self.attackers.push(unit);
        Ok(())
    }

    fn on_board(&self, unit: CardId) -> Option<&Card> {
        if self.board.contains(&unit) {
            self.cards.get(unit).ok()
        } else {
            None
        }
    }

    fn owner_of(&self, card: CardId) -> Result<PlayerId> {
        Ok(self.cards.get(card)?.owner)
    }

    fn enemy_units(&self, player: PlayerId) -> Vec<CardId> {
        self.board
            .iter()
            .copied()
            .filter(|&id| self.cards.get(id).is_ok_and(|c| c.owner != player))
            .collect()
    }

    fn friendly_units(&self, player: PlayerId) -> Vec<CardId> {
        self.units(player)
    }

    fn legal_targets(&self, card: &Card) -> Vec<Target> {
        match &card.kind {
            CardKind::Spell(SpellEffect::Damage(_)) => {
                let mut targets: Vec<Target> = self.enemy_units(card.owner).into_iter().map(Target::Unit).collect();
                if let Some(opponent) = self.get_other_player_id(card.owner) {
                    targets.push(Target::Player(opponent));
                }
                targets
            }
            CardKind::Spell(SpellEffect::Buff { .. }) => {
                self.friendly_units(card.owner).into_iter().map(Target::Unit).collect()
            }
            CardKind::Unit | CardKind::Attachment { .. } => Vec::new(),
        }
    }

    fn hosts_for(&self, card: &Card) -> Option<Vec<CardId>> {
        match card.kind {
            CardKind::Attachment { .. } => Some(self.friendly_units(card.owner)),
            _ => None,
        }
    }

    fn remove_from_board(&mut self, unit: CardId) {
        self.board.retain(|&id| id != unit);
        self.attackers.retain(|&id| id != unit);
        self.attachments.retain(|&(_, host)| host != unit);
    }

    fn deal_damage(&mut self, unit: CardId, amount: i32) -> Result<()> {
        let card = self.cards.get_mut(unit)?;
        if amount <= 0 {
            return Ok(());
        }
        if card.has_shield() {
            card.keywords.retain(|k| *k != Keyword::Shield);
            return Ok(());
        }
        card.life -= amount;
        if card.life <= 0 {
            self.remove_from_board(unit);
        }
        Ok(())
    }

    fn buff(&mut self, unit: CardId, power: i32, life: i32) -> Result<()> {
        let card = self.cards.get_mut(unit)?;
        card.power += power;
        card.life += life;
        Ok(())
    }

    fn resolve(&mut self, card: &Card, target: Option<Target>, host: Option<CardId>) -> Result<()> {
        match (&card.kind, target, host) {
            (CardKind::Unit, _, _) => {
                let unit = self.cards.get_mut(card.id)?;
                unit.summoning_sick = true;
                self.board.push(card.id);
            }
            (CardKind::Spell(_), None, _) => {}
            (CardKind::Spell(SpellEffect::Damage(n)), Some(Target::Unit(unit)), _) => self.deal_damage(unit, *n)?,
            (CardKind::Spell(SpellEffect::Damage(n)), Some(Target::Player(player)), _) => {
                self.get_player_mut(player)?.lose_life(*n);
            }
            (CardKind::Spell(SpellEffect::Buff { power, life }), Some(Target::Unit(unit)), _) => {
                self.buff(unit, *power, *life)?;
            }
            (CardKind::Spell(SpellEffect::Buff { .. }), Some(Target::Player(_)), _) => {
                return Err(AiError::InvalidAction(format!("card {} can't target a player", card.id)));
            }
            (CardKind::Attachment { power, life }, _, Some(host)) => {
                self.buff(host, *power, *life)?;
                self.attachments.push((card.id, host));
            }
            (CardKind::Attachment { .. }, _, None) => {
                return Err(AiError::InvalidAction(format!("card {} needs a host", card.id)));
            }
        }
        Ok(())
    }

    fn check_play(&self, card: &Card, target: Option<Target>, host: Option<CardId>) -> Result<()> {
        if !matches!(self.phase, Phase::Resource | Phase::Main) {
            return Err(AiError::InvalidAction(format!("can't play cards in the {} phase", self.phase)));
        }
        let player = self.get_player(card.owner)?;
        if !player.hand.contains(&card.id) {
            return Err(AiError::InvalidAction(format!("card {} is not in hand", card.id)));
        }
        if card.cost > player.budget {
            return Err(AiError::InvalidAction(format!(
                "card {} costs {} with {} available",
                card.id, card.cost, player.budget
            )));
        }
        if let Some(target) = target {
            if !self.legal_targets(card).contains(&target) {
                return Err(AiError::InvalidAction(format!("{target} is not a legal target for card {}", card.id)));
            }
        } else if matches!(card.kind, CardKind::Spell(_)) && !card.target_optional {
            return Err(AiError::InvalidAction(format!("card {} needs a target", card.id)));
        }
        match (self.hosts_for(card), host) {
            (Some(hosts), Some(host)) if !hosts.contains(&host) => {
                Err(AiError::InvalidAction(format!("unit {host} can't host card {}", card.id)))
            }
            (Some(_), None) => Err(AiError::InvalidAction(format!("card {} needs a host", card.id))),
            (None, Some(_)) => Err(AiError::InvalidAction(format!("card {} doesn't attach", card.id))),
            _ => Ok(()),
        }
    }
}

/// Unit valuation: base body, stats, cost and keyword adjustments
///
/// `consider_life` is off when valuing a unit that is expected to survive
/// whatever is being done to it.
pub fn evaluate_unit(card: &Card, consider_life: bool) -> Result<f64> {
    if card.life <= 0 {
        return Err(AiError::Evaluation(
            card.id.as_u32(),
            format!("unit has non-positive life {}", card.life),
        ));
    }
    let power = card.power;
    let mut value = 100 + power * 15 + card.cost as i32 * 5;
    if consider_life {
        value += card.life * 10;
    }

    if card.has_flying() {
        value += power * 10;
    }
    if power > 0 && card.is_lethal() {
        value += 25;
    }
    if card.has_shield() {
        value += 30;
    }
    if card.has_reach() {
        value += 5;
    }
    if card.has_keyword(&Keyword::Defender) {
        value -= power * 9 + 40;
    }
    if card.has_keyword(&Keyword::CantBlock) {
        value -= 10;
    }
    Ok(value as f64)
}

impl GameView for Table {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn budget(&self, player: PlayerId) -> u32 {
        self.get_player(player).map_or(0, |p| p.budget)
    }

    fn life(&self, player: PlayerId) -> i32 {
        self.get_player(player).map_or(0, |p| p.life)
    }

    fn hand(&self, player: PlayerId) -> Vec<CardId> {
        self.get_player(player).map(|p| p.hand.clone()).unwrap_or_default()
    }

    fn units(&self, player: PlayerId) -> Vec<CardId> {
        self.board
            .iter()
            .copied()
            .filter(|&id| self.cards.get(id).is_ok_and(|c| c.owner == player))
            .collect()
    }

    fn declared_attackers(&self) -> Vec<CardId> {
        self.attackers.clone()
    }

    fn modifiable_effects(&self, player: PlayerId) -> Vec<EffectId> {
        self.effects
            .iter()
            .filter(|e| e.owner == player && e.remaining_value > 0.0)
            .map(|e| e.id)
            .collect()
    }

    fn effect(&self, effect: EffectId) -> Result<OngoingEffect> {
        self.effects
            .iter()
            .find(|e| e.id == effect)
            .cloned()
            .ok_or(AiError::EntityNotFound(effect.as_u32()))
    }

    fn is_playable(&self, card: CardId) -> bool {
        let Ok(card) = self.cards.get(card) else {
            return false;
        };
        let Ok(player) = self.get_player(card.owner) else {
            return false;
        };
        if !matches!(self.phase, Phase::Resource | Phase::Main)
            || !player.hand.contains(&card.id)
            || card.cost > player.budget
        {
            return false;
        }
        match card.kind {
            CardKind::Unit => true,
            CardKind::Spell(_) => card.target_optional || !self.legal_targets(card).is_empty(),
            CardKind::Attachment { .. } => self.hosts_for(card).is_some_and(|h| !h.is_empty()),
        }
    }

    fn card_cost(&self, card: CardId) -> Result<u32> {
        Ok(self.cards.get(card)?.cost)
    }

    fn evaluate_card(&self, card: CardId, context: EvalContext) -> Result<f64> {
        let card = self.cards.get(card)?;
        match (&card.kind, context) {
            (CardKind::Unit, EvalContext::NonLethalRemoval) => evaluate_unit(card, false),
            (CardKind::Unit, _) => evaluate_unit(card, true),
            // Spells are worth what they do to their target.
            (CardKind::Spell(_), EvalContext::PlayCandidate) => Ok(0.0),
            (CardKind::Attachment { power, life }, EvalContext::PlayCandidate) => {
                Ok((power * 15 + life * 10) as f64)
            }
            _ => Err(AiError::InvalidAction(format!(
                "card {} can't be valued as {context:?}",
                card.id
            ))),
        }
    }

    fn target_requirement(&self, card: CardId) -> Result<Option<TargetRequirement>> {
        let card = self.cards.get(card)?;
        match card.kind {
            CardKind::Spell(_) => Ok(Some(TargetRequirement {
                targets: self.legal_targets(card),
                mandatory: !card.target_optional,
            })),
            _ => Ok(None),
        }
    }

    fn target_score(&self, card: CardId, target: Target) -> Result<f64> {
        let card = self.cards.get(card)?;
        match (&card.kind, target) {
            (CardKind::Spell(SpellEffect::Damage(n)), Target::Unit(unit)) => {
                let victim = self.cards.get(unit)?;
                if *n >= victim.life && !victim.has_shield() {
                    self.removal_value(unit)
                } else {
                    Ok((n * 5) as f64)
                }
            }
            (CardKind::Spell(SpellEffect::Damage(n)), Target::Player(player)) => {
                if *n >= self.life(player) {
                    // Lethal to the face beats anything on the board.
                    Ok(10_000.0)
                } else {
                    Ok((n * 5) as f64)
                }
            }
            (CardKind::Spell(SpellEffect::Buff { power, life }), Target::Unit(unit)) => {
                let host = self.cards.get(unit)?;
                let mut buffed = host.clone();
                buffed.power += power;
                buffed.life += life;
                Ok(evaluate_unit(&buffed, true)? - evaluate_unit(host, true)?)
            }
            _ => Err(AiError::InvalidAction(format!("{target} is not a target for card {}", card.id))),
        }
    }

    fn eligible_hosts(&self, card: CardId) -> Result<Option<Vec<CardId>>> {
        Ok(self.hosts_for(self.cards.get(card)?))
    }

    fn host_multiplier(&self, _card: CardId, host: CardId, context: EvalContext) -> Result<f64> {
        Ok(1.0 + self.evaluate_card(host, context)? / 100.0)
    }

    fn combat_stats(&self, unit: CardId) -> Result<CombatStats> {
        Ok(CombatStats::from_card(self.cards.get(unit)?))
    }

    fn can_attack(&self, unit: CardId) -> bool {
        self.on_board(unit)
            .is_some_and(|c| !c.tapped && !c.summoning_sick && !c.has_keyword(&Keyword::Defender))
    }

    fn can_block(&self, blocker: CardId, attacker: CardId) -> bool {
        let (Some(b), Some(a)) = (self.on_board(blocker), self.on_board(attacker)) else {
            return false;
        };
        if b.tapped || b.owner == a.owner || b.has_keyword(&Keyword::CantBlock) {
            return false;
        }
        !a.has_flying() || b.has_flying() || b.has_reach()
    }

    fn is_evasive(&self, unit: CardId) -> bool {
        self.cards.get(unit).is_ok_and(|c| c.has_flying())
    }

    fn is_untapped(&self, unit: CardId) -> bool {
        self.on_board(unit).is_some_and(|c| !c.tapped)
    }

    fn can_play_resource(&self, player: PlayerId) -> bool {
        self.phase == Phase::Resource && self.get_player(player).is_ok_and(|p| p.can_play_resource())
    }

    fn known_pool(&self, player: PlayerId) -> Vec<CardId> {
        self.get_player(player).map(|p| p.known_pool.clone()).unwrap_or_default()
    }
}

impl GameActions for Table {
    fn play_card(&mut self, card: CardId, target: Option<Target>, host: Option<CardId>) -> Result<()> {
        let played = self.cards.get(card)?.clone();
        self.check_play(&played, target, host)?;

        let player = self.get_player_mut(played.owner)?;
        player.spend(played.cost);
        player.remove_from_hand(card);
        self.resolve(&played, target, host)?;

        self.history.push(CommittedAction::PlayCard { card, target, host });
        Ok(())
    }

    fn modify_effect(&mut self, effect: EffectId) -> Result<()> {
        let pos = self
            .effects
            .iter()
            .position(|e| e.id == effect)
            .ok_or(AiError::EntityNotFound(effect.as_u32()))?;
        let (owner, cost, magnitude) = {
            let e = &self.effects[pos];
            (e.owner, e.modify_cost, e.magnitude)
        };
        if !self.get_player_mut(owner)?.spend(cost) {
            return Err(AiError::InvalidAction(format!("can't afford to modify effect {effect}")));
        }
        let e = &mut self.effects[pos];
        e.remaining_value = (e.remaining_value - magnitude.max(1.0)).max(0.0);

        self.history.push(CommittedAction::ModifyEffect(effect));
        Ok(())
    }

    fn declare_attacker(&mut self, unit: CardId) -> Result<()> {
        if self.phase != Phase::Attack {
            return Err(AiError::InvalidAction(format!("can't attack in the {} phase", self.phase)));
        }
        if !self.can_attack(unit) {
            return Err(AiError::InvalidAction(format!("unit {unit} can't attack")));
        }
        self.cards.get_mut(unit)?.tap();
        self.attackers.push(unit);
        self.history.push(CommittedAction::Attack(unit));
        Ok(())
    }

    fn declare_blocker(&mut self, blocker: CardId, attacker: CardId) -> Result<()> {
        if self.phase != Phase::Block {
            return Err(AiError::InvalidAction(format!("can't block in the {} phase", self.phase)));
        }
        if !self.attackers.contains(&attacker) {
            return Err(AiError::InvalidAction(format!("unit {attacker} is not attacking")));
        }
        if self.blocks.iter().any(|&(b, _)| b == blocker) {
            return Err(AiError::InvalidAction(format!("unit {blocker} is already blocking")));
        }
        if !self.can_block(blocker, attacker) {
            return Err(AiError::InvalidAction(format!("unit {blocker} can't block unit {attacker}")));
        }
        self.blocks.push((blocker, attacker));
        self.history.push(CommittedAction::Block { blocker, attacker });
        Ok(())
    }

    fn play_resource(&mut self, card: CardId) -> Result<()> {
        let owner = self.owner_of(card)?;
        if !self.can_play_resource(owner) {
            return Err(AiError::InvalidAction(format!("player {owner} can't play a resource now")));
        }
        let player = self.get_player_mut(owner)?;
        if !player.remove_from_hand(card) {
            return Err(AiError::InvalidAction(format!("card {card} is not in hand")));
        }
        player.play_resource();
        self.history.push(CommittedAction::Resource(card));
        Ok(())
    }

    fn submit_choice(&mut self, selection: &[CardId]) -> Result<()> {
        self.history.push(CommittedAction::Choice(selection.to_vec()));
        Ok(())
    }
}
