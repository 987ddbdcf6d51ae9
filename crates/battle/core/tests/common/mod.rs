//! Fixtures shared by the battle-core integration tests.
#![allow(dead_code)]

use battle_core::{
    ActionRequest, Battle, BattleConfig, BattleEnv, BattleEvent, CombatStats, CombatantId,
    CombatantSpec, ContentTables, RngOracle, Stat, StepOutcome, Team,
};

/// Returns the same value for every seed.
///
/// With 9_950 every d100 is 51 (hits at the default 90% chance, passes the
/// paralysis roll), every critical roll is 9_950 (never critical below a
/// 99% rate) and the starting gauge is `9_950 % 3_001 = 947`.
pub struct SteadyRng(pub u32);

impl RngOracle for SteadyRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

pub const STEADY: SteadyRng = SteadyRng(9_950);

pub const ALLY: CombatantId = CombatantId(0);
pub const ENEMY: CombatantId = CombatantId(1);

pub fn stats(pairs: &[(Stat, i32)]) -> CombatStats {
    pairs
        .iter()
        .fold(CombatStats::default(), |stats, (stat, value)| stats.with(*stat, *value))
}

pub fn ally(pairs: &[(Stat, i32)]) -> CombatantSpec {
    CombatantSpec::new("hero", Team::Ally).with_stats(stats(pairs))
}

pub fn enemy(pairs: &[(Stat, i32)]) -> CombatantSpec {
    CombatantSpec::new("slime", Team::Enemy).with_stats(stats(pairs))
}

pub fn start(roster: &[CombatantSpec], tables: &ContentTables, rng: &dyn RngOracle) -> Battle {
    Battle::new(
        roster,
        BattleConfig::default(),
        7,
        BattleEnv::from_tables(tables, rng),
    )
    .expect("battle should start")
}

/// Step until someone's turn opens, collecting every event on the way.
pub fn next_turn(battle: &mut Battle, env: BattleEnv<'_>) -> (CombatantId, Vec<BattleEvent>) {
    let mut events = Vec::new();
    for _ in 0..100_000 {
        let result = battle.step(env).expect("step should succeed");
        events.extend(result.events);
        match result.outcome {
            StepOutcome::AwaitingAction(actor) => return (actor, events),
            StepOutcome::Finished(team) => panic!("battle ended early, {team} won"),
            _ => {}
        }
    }
    panic!("no turn opened");
}

/// Step until `actor`'s turn opens; everybody else waits.
pub fn turn_of(
    battle: &mut Battle,
    env: BattleEnv<'_>,
    actor: CombatantId,
) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    loop {
        let (ready, mut seen) = next_turn(battle, env);
        events.append(&mut seen);
        if ready == actor {
            return events;
        }
        let result = battle
            .submit(ActionRequest::wait(ready), env)
            .expect("wait should be accepted");
        events.extend(result.events);
    }
}

pub fn submit(battle: &mut Battle, env: BattleEnv<'_>, request: ActionRequest) -> Vec<BattleEvent> {
    battle.submit(request, env).expect("submit should succeed").events
}

pub fn count(events: &[BattleEvent], pred: impl Fn(&BattleEvent) -> bool) -> usize {
    events.iter().filter(|event| pred(event)).count()
}
