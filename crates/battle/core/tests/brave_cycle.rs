//! Brave attacks, HP attacks and the Break cycle.
mod common;

use battle_core::combat::{calculate_damage, hp_attack_damage};
use battle_core::{ActionRequest, BattleEnv, BattleEvent, ContentTables, Stat};
use common::{ALLY, ENEMY, STEADY, ally, count, enemy, start, submit, turn_of};

#[test]
fn brave_then_hp_combo() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 50)]),
        enemy(&[(Stat::PhysicalDefense, 10)])
            .with_hp(5_000)
            .with_brave(1_000, 9_999),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY));
    assert!(events.contains(&BattleEvent::BraveDamage {
        actor: ALLY,
        target: ENEMY,
        amount: 500,
        gained: 500,
        critical: battle_core::CriticalTier::Normal,
        element_percent: 100,
    }));
    assert_eq!(battle.combatant(ALLY).unwrap().brave, 500);
    assert_eq!(battle.combatant(ENEMY).unwrap().brave, 500);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::hp_attack(ALLY, ENEMY));

    let expected = hp_attack_damage(500, 50, 10, 100);
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::HpDamage { target, amount, .. } if *target == ENEMY && *amount == expected
    )));
    assert_eq!(battle.combatant(ALLY).unwrap().brave, 0);
    assert_eq!(battle.combatant(ENEMY).unwrap().hp, 5_000 - expected);
}

#[test]
fn hp_attack_pool_is_the_actor_brave_at_parity() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 40)]).with_brave(500, 9_999),
        enemy(&[(Stat::PhysicalDefense, 40)]).with_hp(2_000),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::hp_attack(ALLY, ENEMY));

    assert_eq!(battle.combatant(ENEMY).unwrap().hp, 1_500);
    assert_eq!(battle.combatant(ALLY).unwrap().brave, 0);
}

#[test]
fn hp_attack_with_empty_pool_still_deals_one() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[]), enemy(&[]).with_hp(10)];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::hp_attack(ALLY, ENEMY));

    assert_eq!(battle.combatant(ENEMY).unwrap().hp, 9);
}

#[test]
fn brave_attack_floors_target_pool_at_zero() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 50)]),
        enemy(&[(Stat::PhysicalDefense, 10)]).with_brave(120, 9_999),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY));

    // the attacker still gains the full raw damage
    assert_eq!(battle.combatant(ENEMY).unwrap().brave, 0);
    assert_eq!(battle.combatant(ALLY).unwrap().brave, 500);
}

#[test]
fn full_break_cycle() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 70)]),
        enemy(&[(Stat::PhysicalDefense, 20)])
            .with_hp(5_000)
            .with_brave(300, 9_999),
    ];
    let mut battle = start(&roster, &tables, &STEADY);
    assert_eq!(calculate_damage(70, 20, 100, 100, 100), 350);

    let mut log = turn_of(&mut battle, env, ALLY);
    log.extend(submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY)));

    let target = battle.combatant(ENEMY).unwrap();
    assert_eq!(target.brave, 0);
    assert!(target.is_broken);
    assert_eq!(
        count(&log, |e| matches!(e, BattleEvent::Break { target, .. } if *target == ENEMY)),
        1
    );

    log.extend(turn_of(&mut battle, env, ALLY));
    log.extend(submit(&mut battle, env, ActionRequest::hp_attack(ALLY, ENEMY)));

    let boosted = hp_attack_damage(350, 70, 20, 150);
    assert_eq!(battle.combatant(ENEMY).unwrap().hp, 5_000 - boosted);
    assert!(!battle.combatant(ENEMY).unwrap().is_broken);
    assert!(log.contains(&BattleEvent::BreakCleared { target: ENEMY }));

    // the bonus applies once: an empty target pool does not break again
    log.extend(turn_of(&mut battle, env, ALLY));
    log.extend(submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY)));
    log.extend(turn_of(&mut battle, env, ALLY));
    log.extend(submit(&mut battle, env, ActionRequest::hp_attack(ALLY, ENEMY)));

    let plain = hp_attack_damage(350, 70, 20, 100);
    assert_eq!(battle.combatant(ENEMY).unwrap().hp, 5_000 - boosted - plain);
    assert_eq!(count(&log, |e| matches!(e, BattleEvent::Break { .. })), 1);
}

#[test]
fn rebuilding_brave_clears_break() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 50)]).with_brave(0, 9_999),
        enemy(&[(Stat::PhysicalAttack, 50), (Stat::PhysicalDefense, 10)])
            .with_brave(100, 9_999),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY));
    assert!(battle.combatant(ENEMY).unwrap().is_broken);

    turn_of(&mut battle, env, ENEMY);
    let events = submit(&mut battle, env, ActionRequest::brave_attack(ENEMY, ALLY));

    assert!(events.contains(&BattleEvent::BreakCleared { target: ENEMY }));
    assert!(!battle.combatant(ENEMY).unwrap().is_broken);
}

#[test]
fn defend_raises_defense_until_next_turn() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 50)]),
        enemy(&[(Stat::PhysicalDefense, 10)]).with_brave(2_000, 9_999),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ENEMY);
    submit(&mut battle, env, ActionRequest::defend(ENEMY));
    assert!(battle.combatant(ENEMY).unwrap().guarding);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY));
    assert_eq!(battle.combatant(ALLY).unwrap().brave, calculate_damage(50, 15, 100, 100, 100));

    turn_of(&mut battle, env, ENEMY);
    assert!(!battle.combatant(ENEMY).unwrap().guarding);
}
