//! Attack and block planning scenarios on an in-memory table

use duel_ai::ai::{classify, favorably_blocks, AiConfig, AttackPlanner, BlockPlanner, CombatStats, OutcomeCategory};
use duel_ai::core::{Card, CardId, Keyword, PlayerId};
use duel_ai::game::{AiLogger, GameView, Phase, Table};

fn me() -> PlayerId {
    PlayerId::new(0)
}

fn them() -> PlayerId {
    PlayerId::new(1)
}

fn config() -> AiConfig {
    AiConfig::new(me(), them())
}

fn quiet_logger() -> AiLogger {
    let mut logger = AiLogger::new();
    logger.enable_capture();
    logger
}

fn unit(id: u32, owner: PlayerId, power: i32, life: i32) -> Card {
    Card::unit(CardId::new(id), format!("Unit {id}"), owner, power, life)
}

/// Table in the block phase with `attackers` already declared by the opponent
fn block_table(life: i32, attackers: Vec<Card>, blockers: Vec<Card>) -> Table {
    let mut table = Table::two_player(Phase::Block, life);
    for blocker in blockers {
        table.add_to_board(blocker).unwrap();
    }
    for attacker in attackers {
        let id = table.add_to_board(attacker).unwrap();
        table.force_attacker(id).unwrap();
    }
    table
}

#[test]
fn test_classifier_examples() {
    assert_eq!(
        classify(&CombatStats::new(3, 3), &CombatStats::new(1, 2)),
        OutcomeCategory::BlockerDies
    );
    assert_eq!(
        classify(&CombatStats::new(1, 1), &CombatStats::new(1, 1).with_shield()),
        OutcomeCategory::AttackerDies
    );
}

#[test]
fn test_neither_dies_is_always_favorable() {
    for (attacker, blocker) in [
        (CombatStats::new(2, 5), CombatStats::new(2, 5)),
        (CombatStats::new(6, 6), CombatStats::new(1, 1).with_shield()),
        (CombatStats::new(0, 1), CombatStats::new(0, 1)),
    ] {
        assert_eq!(classify(&attacker, &blocker), OutcomeCategory::NeitherDies);
        assert!(favorably_blocks(&attacker, &blocker, 500.0, 1.0));
        assert!(favorably_blocks(&attacker, &blocker, 1.0, 500.0));
    }
}

#[test]
fn test_block_when_incoming_damage_is_lethal() {
    // Two 6/6 attackers against 10 life; a shielded 1/1 survives the first.
    let table = block_table(
        10,
        vec![unit(10, them(), 6, 6), unit(11, them(), 6, 6)],
        vec![unit(1, me(), 1, 1).with_keyword(Keyword::Shield)],
    );
    let config = config();
    let logger = quiet_logger();

    let blocks = BlockPlanner::new(&config, &logger).plan(&table).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].attacker, CardId::new(10));
    assert_eq!(blocks[0].blocker, CardId::new(1));
    assert_eq!(blocks[0].outcome, OutcomeCategory::NeitherDies);
}

#[test]
fn test_chump_block_only_when_lethal() {
    let chump = || vec![unit(1, me(), 1, 1)];
    let config = config();
    let logger = quiet_logger();

    let lethal = block_table(10, vec![unit(10, them(), 6, 6), unit(11, them(), 6, 6)], chump());
    let blocks = BlockPlanner::new(&config, &logger).plan(&lethal).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].outcome, OutcomeCategory::BlockerDies);

    let survivable = block_table(20, vec![unit(10, them(), 6, 6), unit(11, them(), 6, 6)], chump());
    let blocks = BlockPlanner::new(&config, &logger).plan(&survivable).unwrap();
    assert!(blocks.is_empty());
}

#[test]
fn test_each_blocker_used_once() {
    let table = block_table(
        20,
        vec![unit(10, them(), 2, 2), unit(11, them(), 2, 2), unit(12, them(), 2, 2)],
        vec![unit(1, me(), 4, 4), unit(2, me(), 4, 4)],
    );
    let config = config();
    let logger = quiet_logger();

    let blocks = BlockPlanner::new(&config, &logger).plan(&table).unwrap();
    assert_eq!(blocks.len(), 2);
    let mut blockers: Vec<CardId> = blocks.iter().map(|b| b.blocker).collect();
    blockers.sort();
    blockers.dedup();
    assert_eq!(blockers.len(), 2);
    assert!(blocks.iter().all(|b| b.outcome == OutcomeCategory::AttackerDies));
}

#[test]
fn test_evasive_attacker_is_blocked_first() {
    // The reach unit can block either attacker; the flyer gets it.
    let table = block_table(
        20,
        vec![
            unit(10, them(), 3, 2),
            unit(11, them(), 2, 2).with_keyword(Keyword::Flying),
        ],
        vec![unit(1, me(), 2, 4).with_keyword(Keyword::Reach)],
    );
    let config = config();
    let logger = quiet_logger();

    let blocks = BlockPlanner::new(&config, &logger).plan(&table).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].attacker, CardId::new(11));
    assert_eq!(blocks[0].outcome, OutcomeCategory::AttackerDies);
}

#[test]
fn test_even_trade_taken_uneven_declined() {
    let config = config();
    let logger = quiet_logger();

    // Equal bodies: trade score 0, so the trade is accepted.
    let even = block_table(20, vec![unit(10, them(), 3, 3)], vec![unit(1, me(), 3, 3)]);
    let blocks = BlockPlanner::new(&config, &logger).plan(&even).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].outcome, OutcomeCategory::BothDie);
    assert_eq!(blocks[0].trade_score, 0.0);

    // Our 4/3 is worth more than their 3/3: keep it home.
    let uneven = block_table(20, vec![unit(10, them(), 3, 3)], vec![unit(1, me(), 4, 3)]);
    let blocks = BlockPlanner::new(&config, &logger).plan(&uneven).unwrap();
    assert!(blocks.is_empty());
}

#[test]
fn test_no_attackers_no_blocks() {
    let table = block_table(20, vec![], vec![unit(1, me(), 4, 4)]);
    let config = config();
    let logger = quiet_logger();
    assert!(BlockPlanner::new(&config, &logger).plan(&table).unwrap().is_empty());
}

fn attack_table(ours: Vec<Card>, theirs: Vec<Card>) -> Table {
    let mut table = Table::two_player(Phase::Attack, 20);
    for card in ours.into_iter().chain(theirs) {
        table.add_to_board(card).unwrap();
    }
    table
}

#[test]
fn test_attack_when_no_favorable_blocker() {
    let table = attack_table(vec![unit(1, me(), 3, 3)], vec![unit(10, them(), 1, 1)]);
    let config = config();
    let logger = quiet_logger();

    let attackers = AttackPlanner::new(&config, &logger).plan(&table).unwrap();
    assert_eq!(attackers, vec![CardId::new(1)]);
}

#[test]
fn test_hold_back_against_bigger_blocker() {
    let table = attack_table(vec![unit(1, me(), 3, 3)], vec![unit(10, them(), 4, 4)]);
    let config = config();
    let logger = quiet_logger();

    assert!(AttackPlanner::new(&config, &logger).plan(&table).unwrap().is_empty());
}

#[test]
fn test_attack_into_cheaper_trade() {
    // A lethal 1/1 trades with our 3/3 but is worth less, so it won't block favorably.
    let table = attack_table(
        vec![unit(1, me(), 3, 3)],
        vec![unit(10, them(), 1, 1).with_keyword(Keyword::Lethal)],
    );
    let config = config();
    let logger = quiet_logger();

    assert!(table.removal_value(CardId::new(10)).unwrap() < table.removal_value(CardId::new(1)).unwrap());
    assert_eq!(AttackPlanner::new(&config, &logger).plan(&table).unwrap(), vec![CardId::new(1)]);
}

#[test]
fn test_flyer_ignores_ground_blockers() {
    let table = attack_table(
        vec![unit(1, me(), 2, 2).with_keyword(Keyword::Flying), unit(2, me(), 2, 2)],
        vec![unit(10, them(), 5, 5)],
    );
    let config = config();
    let logger = quiet_logger();

    assert_eq!(AttackPlanner::new(&config, &logger).plan(&table).unwrap(), vec![CardId::new(1)]);
}

#[test]
fn test_tapped_and_sick_units() {
    let mut sick = unit(1, me(), 3, 3);
    sick.summoning_sick = true;
    let mut tapped_blocker = unit(10, them(), 5, 5);
    tapped_blocker.tap();
    let table = attack_table(vec![sick, unit(2, me(), 3, 3)], vec![tapped_blocker]);
    let config = config();
    let logger = quiet_logger();

    assert_eq!(AttackPlanner::new(&config, &logger).plan(&table).unwrap(), vec![CardId::new(2)]);
}

#[test]
fn test_zero_power_units_stay_home() {
    let table = attack_table(vec![unit(1, me(), 0, 4)], vec![]);
    let config = config();
    let logger = quiet_logger();

    assert!(AttackPlanner::new(&config, &logger).plan(&table).unwrap().is_empty());
}
