//! Skills, casting and items.
mod common;

use battle_core::combat::{calculate_damage, hp_attack_damage};
use battle_core::{
    ActionRequest, Battle, BattleEnv, BattleEvent, BlockCause, CombatantId, ContentTables,
    Element, FailureReason, ItemDefinition, ItemEffect, Resource, SkillDefinition, SkillKind,
    Stat, StatusKind, StatusTemplate, StepOutcome, TargetScope,
};
use common::{ALLY, ENEMY, STEADY, ally, count, enemy, start, submit, turn_of};

fn tables() -> ContentTables {
    ContentTables::new()
        .with_skill(
            SkillDefinition::new("fire", "Fire", SkillKind::Brave)
                .magical(Element::Neutral)
                .with_mp_cost(10)
                .with_cast_time(Some(10)),
        )
        .with_skill(
            SkillDefinition::new("meteor", "Meteor", SkillKind::Brave)
                .magical(Element::Neutral)
                .with_mp_cost(10)
                .with_cast_time(Some(50)),
        )
        .with_skill(
            SkillDefinition::new("flare", "Flare", SkillKind::Brave)
                .magical(Element::Neutral)
                .with_power(500)
                .with_cast_time(None),
        )
        .with_skill(SkillDefinition::new("slash", "Slash", SkillKind::Brave).with_cooldown(2))
        .with_skill(
            SkillDefinition::new("sweep", "Sweep", SkillKind::Brave)
                .with_target(TargetScope::AllEnemies),
        )
        .with_skill(
            SkillDefinition::new("finisher", "Finisher", SkillKind::Hp)
                .with_target(TargetScope::AllEnemies),
        )
        .with_skill(
            SkillDefinition::new("cure", "Cure", SkillKind::Support)
                .with_target(TargetScope::SingleAlly),
        )
        .with_status(StatusTemplate::new("silence", "Silence", StatusKind::Silence).with_duration(3))
        .with_item(ItemDefinition::new(
            "potion",
            "Potion",
            vec![ItemEffect::RestoreHp(50)],
        ))
}

/// Step (everyone else waiting) until an event matches.
fn until(battle: &mut Battle, env: BattleEnv<'_>, pred: impl Fn(&BattleEvent) -> bool) -> Vec<BattleEvent> {
    let mut log = Vec::new();
    for _ in 0..100_000 {
        let result = battle.step(env).unwrap();
        log.extend(result.events);
        if let StepOutcome::AwaitingAction(actor) = result.outcome {
            log.extend(submit(battle, env, ActionRequest::wait(actor)));
        }
        if log.iter().any(&pred) {
            return log;
        }
    }
    panic!("event never happened");
}

fn fire(actor: CombatantId) -> ActionRequest {
    ActionRequest::skill(actor, "fire", vec![ENEMY])
}

#[test]
fn cast_holds_the_action_until_complete() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[(Stat::MagicAttack, 80)]).with_mp(30), enemy(&[])];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, fire(ALLY));
    assert!(events.contains(&BattleEvent::CastStarted {
        actor: ALLY,
        skill: "fire".into(),
        duration: 1_000,
    }));
    let caster = battle.combatant(ALLY).unwrap();
    assert!(caster.is_casting());
    assert_eq!(caster.mp, 20);
    assert_eq!(caster.brave, 0);

    let log = until(&mut battle, env, |e| matches!(e, BattleEvent::CastCompleted { .. }));
    assert_eq!(
        count(&log, |e| matches!(e, BattleEvent::BraveDamage { actor, .. } if *actor == ALLY)),
        1
    );
    let caster = battle.combatant(ALLY).unwrap();
    assert!(!caster.is_casting());
    assert_eq!(caster.brave, calculate_damage(80, 20, 100, 100, 100));
    assert_eq!(caster.turns_taken, 1);
}

#[test]
fn cast_time_derives_from_power_and_magic() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[(Stat::MagicAttack, 0)]), enemy(&[])];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::skill(ALLY, "flare", vec![ENEMY]));
    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::CastStarted { duration: 1_000, .. }
    )));
}

#[test]
fn hp_damage_interrupts_a_cast_with_partial_refund() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    // the enemy is fast enough to act twice before the cast lands
    let roster = [
        ally(&[]).with_mp(30).with_hp(500),
        enemy(&[(Stat::Speed, 500)]),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::skill(ALLY, "meteor", vec![ENEMY]));

    // a Brave hit does not break concentration
    turn_of(&mut battle, env, ENEMY);
    submit(&mut battle, env, ActionRequest::brave_attack(ENEMY, ALLY));
    assert!(battle.combatant(ALLY).unwrap().is_casting());

    turn_of(&mut battle, env, ENEMY);
    let events = submit(&mut battle, env, ActionRequest::hp_attack(ENEMY, ALLY));
    assert!(events.contains(&BattleEvent::CastInterrupted {
        actor: ALLY,
        skill: "meteor".into(),
        refund: 3_000,
    }));
    let caster = battle.combatant(ALLY).unwrap();
    assert!(!caster.is_casting());
    assert_eq!(caster.atb_gauge, 3_000);
    assert_eq!(caster.mp, 20);
}

#[test]
fn external_interrupt_reports_refund_once() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[]).with_mp(30), enemy(&[])];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::skill(ALLY, "meteor", vec![ENEMY]));

    let (refund, events) = battle.interrupt(ALLY).unwrap();
    assert_eq!(refund, Some(3_000));
    assert_eq!(events.len(), 1);

    let (refund, events) = battle.interrupt(ALLY).unwrap();
    assert_eq!(refund, None);
    assert!(events.is_empty());
}

#[test]
fn silence_mid_cast_cancels_and_refunds_mp() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[]).with_mp(30), enemy(&[])];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, fire(ALLY));
    battle
        .apply_status(ALLY, &"silence".into(), None, env)
        .unwrap();

    let log = until(&mut battle, env, |e| matches!(e, BattleEvent::CastCompleted { .. }));
    assert!(log.contains(&BattleEvent::ActionFailed {
        actor: ALLY,
        reason: FailureReason::ActionBlocked(BlockCause::Silenced),
    }));
    assert_eq!(count(&log, |e| matches!(e, BattleEvent::BraveDamage { .. })), 0);
    assert_eq!(battle.combatant(ALLY).unwrap().mp, 30);
}

#[test]
fn silence_blocks_skills_but_not_attacks() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[]).with_mp(30), enemy(&[])];
    let mut battle = start(&roster, &tables, &STEADY);
    battle
        .apply_status(ALLY, &"silence".into(), None, env)
        .unwrap();

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, fire(ALLY));
    assert!(events.contains(&BattleEvent::ActionFailed {
        actor: ALLY,
        reason: FailureReason::ActionBlocked(BlockCause::Silenced),
    }));
    let caster = battle.combatant(ALLY).unwrap();
    assert_eq!(caster.mp, 30);
    assert!(!caster.is_casting());
    assert_eq!(battle.awaiting(), None);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::brave_attack(ALLY, ENEMY));
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::BraveDamage { .. })), 1);
}

#[test]
fn unaffordable_skill_fails_without_spending() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let roster = [ally(&[]).with_mp(5), enemy(&[]).with_brave(100, 9_999)];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, fire(ALLY));

    assert!(events.contains(&BattleEvent::ActionFailed {
        actor: ALLY,
        reason: FailureReason::InsufficientResource,
    }));
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::CastStarted { .. })), 0);
    assert_eq!(battle.combatant(ALLY).unwrap().mp, 5);
    assert_eq!(battle.combatant(ENEMY).unwrap().brave, 100);
}

#[test]
fn cooldown_blocks_the_next_turns() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let mut battle = start(&[ally(&[]), enemy(&[])], &tables, &STEADY);
    let slash = || ActionRequest::skill(ALLY, "slash", vec![ENEMY]);
    let on_cooldown = BattleEvent::ActionFailed {
        actor: ALLY,
        reason: FailureReason::OnCooldown,
    };

    turn_of(&mut battle, env, ALLY);
    assert!(!submit(&mut battle, env, slash()).contains(&on_cooldown));
    assert_eq!(battle.combatant(ALLY).unwrap().skill_cooldown(&"slash".into()), 2);

    for _ in 0..2 {
        turn_of(&mut battle, env, ALLY);
        assert!(submit(&mut battle, env, slash()).contains(&on_cooldown));
    }

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, slash());
    assert!(!events.contains(&on_cooldown));
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::BraveDamage { .. })), 1);
}

#[test]
fn area_skills_hit_every_living_enemy() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let second = CombatantId(2);
    let roster = [
        ally(&[(Stat::PhysicalAttack, 50)]),
        enemy(&[(Stat::PhysicalDefense, 10)]).with_hp(1_000),
        enemy(&[(Stat::PhysicalDefense, 10)]).with_hp(1_000),
    ];
    let mut battle = start(&roster, &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::skill(ALLY, "sweep", vec![]));
    assert_eq!(battle.combatant(ALLY).unwrap().brave, 1_000);

    turn_of(&mut battle, env, ALLY);
    submit(&mut battle, env, ActionRequest::skill(ALLY, "finisher", vec![]));

    let share = hp_attack_damage(500, 50, 10, 100);
    assert_eq!(battle.combatant(ENEMY).unwrap().hp, 1_000 - share);
    assert_eq!(battle.combatant(second).unwrap().hp, 1_000 - share);
    assert_eq!(battle.combatant(ALLY).unwrap().brave, 0);
}

#[test]
fn support_skill_heals_an_ally() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let mut wounded = ally(&[(Stat::MagicAttack, 30)]);
    wounded.hp = Some(40);
    let mut battle = start(&[wounded, enemy(&[])], &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::skill(ALLY, "cure", vec![ALLY]));

    assert!(events.contains(&BattleEvent::Healed {
        target: ALLY,
        resource: Resource::Hp,
        amount: 30,
    }));
    assert_eq!(battle.combatant(ALLY).unwrap().hp, 70);

    // enemies are not valid support targets
    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::skill(ALLY, "cure", vec![ENEMY]));
    assert!(events.contains(&BattleEvent::ActionFailed {
        actor: ALLY,
        reason: FailureReason::InvalidTarget,
    }));
}

#[test]
fn potion_restores_hp_up_to_max() {
    let tables = tables();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let mut wounded = ally(&[]);
    wounded.hp = Some(80);
    let mut battle = start(&[wounded, enemy(&[])], &tables, &STEADY);

    turn_of(&mut battle, env, ALLY);
    let events = submit(&mut battle, env, ActionRequest::item(ALLY, "potion", ALLY));

    assert!(events.contains(&BattleEvent::Healed {
        target: ALLY,
        resource: Resource::Hp,
        amount: 20,
    }));
    assert_eq!(battle.combatant(ALLY).unwrap().hp, 100);
}
