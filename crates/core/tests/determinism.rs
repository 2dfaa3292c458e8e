use dungeon_core::save;
use dungeon_core::{ActionKind, Engine, Intent, SessionConfig, TurnOutcome};

const SCRIPT: [Intent; 12] = [
    Intent::Action(ActionKind::Bump { dx: 1, dy: 0 }),
    Intent::Action(ActionKind::Bump { dx: 1, dy: 0 }),
    Intent::Action(ActionKind::Bump { dx: 0, dy: 1 }),
    Intent::Action(ActionKind::Wait),
    Intent::Action(ActionKind::PickUp),
    Intent::Action(ActionKind::Bump { dx: -1, dy: 1 }),
    Intent::Action(ActionKind::Bump { dx: -1, dy: 0 }),
    Intent::Action(ActionKind::UseItem { item: 0, target: None }),
    Intent::Action(ActionKind::Bump { dx: 0, dy: -1 }),
    Intent::TakeStairs,
    Intent::Action(ActionKind::Bump { dx: 1, dy: 1 }),
    Intent::Action(ActionKind::Wait),
];

fn run(seed: u64, intents: &[Intent]) -> Engine {
    let mut engine = Engine::new(seed, &SessionConfig::default()).expect("engine");
    for intent in intents {
        engine.handle_intent(*intent).expect("no engine error");
    }
    engine
}

fn trace(seed: u64) -> Vec<(TurnOutcome, u64)> {
    let mut engine = Engine::new(seed, &SessionConfig::default()).expect("engine");
    SCRIPT
        .iter()
        .map(|intent| {
            let outcome = engine.handle_intent(*intent).expect("no engine error");
            (outcome, engine.snapshot_hash())
        })
        .collect()
}

#[test]
fn identical_seeds_and_inputs_produce_identical_traces() {
    assert_eq!(trace(12_345), trace(12_345));
}

#[test]
fn different_seeds_produce_different_floors() {
    let left = Engine::new(123, &SessionConfig::default()).expect("engine");
    let right = Engine::new(456, &SessionConfig::default()).expect("engine");
    assert_ne!(left.map().draw_ascii(), right.map().draw_ascii());
    assert_ne!(left.snapshot_hash(), right.snapshot_hash());
}

#[test]
fn save_and_resume_matches_an_uninterrupted_run() {
    let (first, second) = SCRIPT.split_at(5);
    let halfway = run(777, first);
    let bytes = save::to_bytes(&halfway).expect("encode");
    let mut resumed = save::from_bytes(&bytes).expect("decode");
    for intent in second {
        resumed.handle_intent(*intent).expect("no engine error");
    }

    let uninterrupted = run(777, &SCRIPT);
    assert_eq!(resumed.snapshot_hash(), uninterrupted.snapshot_hash());
    assert_eq!(resumed.map().draw_ascii(), uninterrupted.map().draw_ascii());
}

#[test]
fn save_file_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.sav");
    let engine = run(31, &SCRIPT[..4]);
    save::write_atomic(&path, &engine).expect("write");
    let loaded = save::load(&path).expect("load");
    assert_eq!(loaded.snapshot_hash(), engine.snapshot_hash());
    assert_eq!(loaded.log().messages(), engine.log().messages());
}
