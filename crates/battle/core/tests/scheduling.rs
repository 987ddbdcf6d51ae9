//! Gauge scheduling through the public battle loop.
mod common;

use battle_core::{
    ActionRequest, Battle, BattleConfig, BattleEnv, BattleEvent, CombatantId, ContentTables,
    PcgRng, Stat, StepOutcome, Team,
};
use common::{ALLY, ENEMY, STEADY, ally, enemy, start};

/// Every ready actor waits; returns turns taken per combatant.
fn run_waiting(battle: &mut Battle, env: BattleEnv<'_>, total_turns: u32) -> Vec<u32> {
    let mut turns = 0;
    while turns < total_turns {
        let result = battle.step(env).expect("step");
        if let StepOutcome::AwaitingAction(actor) = result.outcome {
            battle.submit(ActionRequest::wait(actor), env).expect("wait");
            turns += 1;
        }
    }
    battle.state().iter().map(|c| c.turns_taken).collect()
}

#[test]
fn turn_share_follows_speed() {
    let tables = ContentTables::new();
    let rng = PcgRng;
    let env = BattleEnv::from_tables(&tables, &rng);
    let roster = [
        ally(&[(Stat::Speed, 100)]),
        enemy(&[(Stat::Speed, 200)]),
        ally(&[(Stat::Speed, 150)]),
    ];
    let mut battle = start(&roster, &tables, &rng);

    let turns = run_waiting(&mut battle, env, 900);
    let per_speed: Vec<f64> = turns
        .iter()
        .zip([100.0, 200.0, 150.0])
        .map(|(t, speed)| f64::from(*t) / speed)
        .collect();
    let mean = per_speed.iter().sum::<f64>() / per_speed.len() as f64;
    for share in per_speed {
        assert!((share - mean).abs() / mean < 0.05, "{share} vs {mean}");
    }
}

#[test]
fn equal_speeds_alternate_in_registration_order() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let mut battle = start(&[ally(&[]), enemy(&[])], &tables, &STEADY);

    let mut order = Vec::new();
    while order.len() < 6 {
        if let StepOutcome::AwaitingAction(actor) = battle.step(env).unwrap().outcome {
            order.push(actor);
            battle.submit(ActionRequest::wait(actor), env).unwrap();
        }
    }
    assert_eq!(order, vec![ALLY, ENEMY, ALLY, ENEMY, ALLY, ENEMY]);
}

#[test]
fn starting_gauges_stay_inside_the_band() {
    let tables = ContentTables::new();
    let rng = PcgRng;
    let config = BattleConfig::default();
    let band = config.percent_of_gauge(config.start_band_percent);
    let roster = [ally(&[]), enemy(&[]), ally(&[]), enemy(&[])];

    for seed in 0..32 {
        let battle = Battle::new(
            &roster,
            config.clone(),
            seed,
            BattleEnv::from_tables(&tables, &rng),
        )
        .unwrap();
        assert!(battle.state().iter().all(|c| c.atb_gauge <= band));
    }
}

#[test]
fn gauges_never_shrink_between_turns() {
    let tables = ContentTables::new();
    let rng = PcgRng;
    let env = BattleEnv::from_tables(&tables, &rng);
    let roster = [
        ally(&[(Stat::Speed, 90)]),
        enemy(&[(Stat::Speed, 130)]),
        enemy(&[(Stat::Speed, 60)]),
    ];
    let mut battle = start(&roster, &tables, &rng);
    let atb_max = battle.config().atb_max;

    for _ in 0..2_000 {
        let before: Vec<(CombatantId, u32, u32)> = battle
            .state()
            .iter()
            .map(|c| (c.id, c.atb_gauge, c.turns_taken))
            .collect();
        let result = battle.step(env).unwrap();
        if let StepOutcome::AwaitingAction(actor) = result.outcome {
            battle.submit(ActionRequest::wait(actor), env).unwrap();
        }
        for (id, gauge, turns) in before {
            let now = battle.combatant(id).unwrap();
            assert!(now.atb_gauge <= atb_max);
            if now.turns_taken == turns {
                assert!(now.atb_gauge >= gauge, "{id} gauge went backwards");
            }
        }
    }
}

#[test]
fn clock_advances_only_while_nobody_is_ready() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let mut battle = start(&[ally(&[]), enemy(&[])], &tables, &STEADY);

    let mut advanced = 0u64;
    loop {
        let result = battle.step(env).unwrap();
        match result.outcome {
            StepOutcome::Advanced => advanced += 1,
            StepOutcome::AwaitingAction(_) => break,
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(battle.state().tick.0, advanced);

    // an open turn holds the clock
    let tick = battle.state().tick;
    let result = battle.step(env).unwrap();
    assert_eq!(result.outcome, StepOutcome::AwaitingAction(ALLY));
    assert_eq!(battle.state().tick, tick);
}

#[test]
fn same_seed_replays_the_same_fight() {
    fn fight(seed: u64) -> Vec<BattleEvent> {
        let tables = ContentTables::new();
        let rng = PcgRng;
        let env = BattleEnv::from_tables(&tables, &rng);
        let roster = [
            ally(&[(Stat::PhysicalAttack, 45), (Stat::Speed, 110)]).with_hp(400),
            enemy(&[(Stat::PhysicalAttack, 35), (Stat::Speed, 95)]).with_hp(400),
            enemy(&[(Stat::PhysicalAttack, 30), (Stat::Speed, 80)]).with_hp(300),
        ];
        let mut battle =
            Battle::new(&roster, BattleConfig::default(), seed, env).unwrap();

        let mut log = Vec::new();
        for _ in 0..200_000 {
            let result = battle.step(env).unwrap();
            log.extend(result.events);
            match result.outcome {
                StepOutcome::Finished(_) => return log,
                StepOutcome::AwaitingAction(actor) => {
                    let me = battle.combatant(actor).unwrap();
                    let foe = battle
                        .state()
                        .living_on(me.team.opponent())
                        .map(|c| c.id)
                        .next()
                        .unwrap();
                    let request = if me.brave >= 150 {
                        ActionRequest::hp_attack(actor, foe)
                    } else {
                        ActionRequest::brave_attack(actor, foe)
                    };
                    log.extend(battle.submit(request, env).unwrap().events);
                }
                _ => {}
            }
        }
        panic!("fight did not finish");
    }

    let first = fight(42);
    assert_eq!(first, fight(42));
    assert!(matches!(first.last(), Some(BattleEvent::BattleEnded { .. })));
}

#[test]
fn battle_ends_when_a_side_falls() {
    let tables = ContentTables::new();
    let env = BattleEnv::from_tables(&tables, &STEADY);
    let mut battle = start(&[ally(&[]), enemy(&[]).with_hp(1)], &tables, &STEADY);

    common::turn_of(&mut battle, env, ALLY);
    let result = battle.submit(ActionRequest::hp_attack(ALLY, ENEMY), env).unwrap();

    assert_eq!(result.outcome, StepOutcome::Finished(Team::Ally));
    assert!(result.events.contains(&BattleEvent::Defeated { target: ENEMY }));
    assert_eq!(
        result.events.last(),
        Some(&BattleEvent::BattleEnded { winner: Team::Ally })
    );
    assert_eq!(battle.winner(), Some(Team::Ally));
    assert_eq!(battle.defeated().map(|c| c.id).collect::<Vec<_>>(), vec![ENEMY]);
}
