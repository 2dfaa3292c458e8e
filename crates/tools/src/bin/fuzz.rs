use std::collections::{HashMap, HashSet};

use anyhow::{Result, ensure};
use clap::Parser;
use game_core::{
    ActionKind, DIRECTIONS, Engine, Entity, EntityId, Intent, Pos, SessionConfig, TurnOutcome,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    intents: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_intent(rng: &mut ChaCha8Rng, engine: &Engine) -> Intent {
    let (dx, dy) = choose(rng, &DIRECTIONS);
    let held = engine.player().and_then(Entity::as_actor).map_or(0, |a| a.inventory.len());
    let slot = rng.next_u64() as usize % (held + 1);
    match rng.next_u64() % 20 {
        0..=11 => Intent::Action(ActionKind::Bump { dx, dy }), // Bias to walking and fighting
        12 => Intent::Action(ActionKind::Wait),
        13 | 14 => Intent::Action(ActionKind::PickUp),
        15 => Intent::Action(ActionKind::UseItem { item: slot, target: None }),
        16 => {
            let player = engine.player().map_or(Pos { y: 0, x: 0 }, |e| e.pos);
            let target = player.offset(dx * 3, dy * 3);
            Intent::Action(ActionKind::UseItem { item: slot, target: Some(target) })
        }
        17 => Intent::Action(ActionKind::DropItem { item: slot }),
        _ => Intent::TakeStairs,
    }
}

fn check_invariants(engine: &Engine) -> Result<()> {
    let map = engine.map();
    let mut blockers = HashSet::new();
    for (id, entity) in map.entities() {
        ensure!(map.is_walkable(entity.pos), "Invariant failed: {} inside a wall", entity.name);
        if let Some(actor) = entity.as_actor() {
            let hp = actor.fighter.hp();
            ensure!(
                (0..=actor.fighter.max_hp()).contains(&hp),
                "Invariant failed: {} has {hp} HP",
                entity.name
            );
            ensure!(entity.is_alive() == (hp > 0), "Invariant failed: liveness disagrees with HP");
        }
        if entity.blocks_movement {
            ensure!(blockers.insert(entity.pos), "Invariant failed: two blockers share {:?}", entity.pos);
        }
        ensure!(
            id == engine.player_id()
                || !entity.is_alive()
                || entity.as_actor().is_none()
                || engine.turn_queue().contains(id),
            "Invariant failed: living enemy {} has no ticket",
            entity.name
        );
    }
    ensure!(
        !engine.turn_queue().contains(engine.player_id()),
        "Invariant failed: player ticket queued while awaiting input"
    );
    Ok(())
}

fn actor_positions(engine: &Engine) -> HashMap<EntityId, Pos> {
    engine.map().living_actors().map(|(id, entity)| (id, entity.pos)).collect()
}

/// Within one floor, no actor covers more than one cell per intent.
fn check_single_steps(before: &HashMap<EntityId, Pos>, engine: &Engine) -> Result<()> {
    for (id, entity) in engine.map().entities() {
        if let Some(start) = before.get(&id) {
            ensure!(
                start.chebyshev(entity.pos) <= 1,
                "Invariant failed: {} moved from {start:?} to {:?} in one turn",
                entity.name,
                entity.pos
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} intents...", args.seed, args.intents);
    let mut engine = Engine::new(args.seed, &SessionConfig::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total = 0;
    let mut rejected = 0;
    while total < args.intents {
        let intent = random_intent(&mut rng, &engine);
        let floor = engine.current_floor();
        let before = actor_positions(&engine);
        total += 1;
        match engine.handle_intent(intent)? {
            TurnOutcome::Acted => {}
            TurnOutcome::Rejected(_) => rejected += 1,
            TurnOutcome::Quit => break,
            TurnOutcome::PlayerDead => {
                println!(
                    "Player died on floor {} after {} intents",
                    engine.current_floor(),
                    total
                );
                break;
            }
        }
        check_invariants(&engine)?;
        if engine.current_floor() == floor {
            check_single_steps(&before, &engine)?;
        }
    }

    println!(
        "Fuzzing completed successfully: {total} intents, {rejected} rejected, floor {}, hash {:016x}",
        engine.current_floor(),
        engine.snapshot_hash()
    );
    Ok(())
}
