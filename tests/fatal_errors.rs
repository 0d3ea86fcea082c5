//! Inconsistent views: playable cards with nothing to aim at
//!
//! A scripted view reports one card as playable while returning an empty
//! target or host list for it. The decision must fail instead of committing.

use duel_ai::ai::{AiConfig, AiPlayer, CombatStats};
use duel_ai::core::{CardId, EffectId, OngoingEffect, PlayerId, Target, TargetRequirement};
use duel_ai::game::{AiLogger, EvalContext, GameActions, GameView, Phase};
use duel_ai::{AiError, Result};

#[derive(Default)]
struct ScriptedView {
    requirement: Option<TargetRequirement>,
    hosts: Option<Vec<CardId>>,
    commits: usize,
}

const CARD: u32 = 7;

impl GameView for ScriptedView {
    fn phase(&self) -> Phase {
        Phase::Main
    }

    fn budget(&self, _player: PlayerId) -> u32 {
        5
    }

    fn life(&self, _player: PlayerId) -> i32 {
        20
    }

    fn hand(&self, _player: PlayerId) -> Vec<CardId> {
        vec![CardId::new(CARD)]
    }

    fn units(&self, _player: PlayerId) -> Vec<CardId> {
        Vec::new()
    }

    fn declared_attackers(&self) -> Vec<CardId> {
        Vec::new()
    }

    fn modifiable_effects(&self, _player: PlayerId) -> Vec<EffectId> {
        Vec::new()
    }

    fn effect(&self, effect: EffectId) -> Result<OngoingEffect> {
        Err(AiError::EntityNotFound(effect.as_u32()))
    }

    fn is_playable(&self, _card: CardId) -> bool {
        true
    }

    fn card_cost(&self, _card: CardId) -> Result<u32> {
        Ok(2)
    }

    fn evaluate_card(&self, _card: CardId, _context: EvalContext) -> Result<f64> {
        Ok(50.0)
    }

    fn target_requirement(&self, _card: CardId) -> Result<Option<TargetRequirement>> {
        Ok(self.requirement.clone())
    }

    fn target_score(&self, _card: CardId, _target: Target) -> Result<f64> {
        Ok(10.0)
    }

    fn eligible_hosts(&self, _card: CardId) -> Result<Option<Vec<CardId>>> {
        Ok(self.hosts.clone())
    }

    fn host_multiplier(&self, _card: CardId, _host: CardId, _context: EvalContext) -> Result<f64> {
        Ok(1.0)
    }

    fn combat_stats(&self, _unit: CardId) -> Result<CombatStats> {
        Ok(CombatStats::new(1, 1))
    }

    fn can_attack(&self, _unit: CardId) -> bool {
        false
    }

    fn can_block(&self, _blocker: CardId, _attacker: CardId) -> bool {
        false
    }

    fn is_evasive(&self, _unit: CardId) -> bool {
        false
    }

    fn is_untapped(&self, _unit: CardId) -> bool {
        true
    }

    fn can_play_resource(&self, _player: PlayerId) -> bool {
        false
    }

    fn known_pool(&self, _player: PlayerId) -> Vec<CardId> {
        Vec::new()
    }
}

impl GameActions for ScriptedView {
    fn play_card(&mut self, _card: CardId, _target: Option<Target>, _host: Option<CardId>) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn modify_effect(&mut self, _effect: EffectId) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn declare_attacker(&mut self, _unit: CardId) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn declare_blocker(&mut self, _blocker: CardId, _attacker: CardId) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn play_resource(&mut self, _card: CardId) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn submit_choice(&mut self, _selection: &[CardId]) -> Result<()> {
        Ok(())
    }
}

fn ai() -> AiPlayer {
    let mut logger = AiLogger::new();
    logger.enable_capture();
    AiPlayer::with_logger(AiConfig::new(PlayerId::new(0), PlayerId::new(1)), logger)
}

#[test]
fn test_mandatory_target_with_no_targets_is_fatal() {
    let mut view = ScriptedView {
        requirement: Some(TargetRequirement {
            targets: Vec::new(),
            mandatory: true,
        }),
        ..Default::default()
    };

    let err = ai().decide(&mut view).unwrap_err();
    assert!(matches!(err, AiError::NoValidTarget(CARD)));
    assert!(err.is_fatal());
    assert_eq!(view.commits, 0);
}

#[test]
fn test_optional_target_with_no_targets_is_fine() {
    let mut view = ScriptedView {
        requirement: Some(TargetRequirement {
            targets: Vec::new(),
            mandatory: false,
        }),
        ..Default::default()
    };

    // The card is worth 50 on its own, so it is played untargeted. The
    // scripted budget never drops, so the step limit ends the run.
    let ai = ai();
    ai.decide(&mut view).unwrap();
    assert_eq!(view.commits, ai.config().max_steps);
}

#[test]
fn test_attachment_with_no_hosts_is_fatal() {
    let mut view = ScriptedView {
        hosts: Some(Vec::new()),
        ..Default::default()
    };

    let err = ai().decide(&mut view).unwrap_err();
    assert!(matches!(err, AiError::NoEligibleHost(CARD)));
    assert_eq!(view.commits, 0);
}
