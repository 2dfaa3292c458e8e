use dungeon_core::ai::AiView;
use dungeon_core::content;
use dungeon_core::{
    Action, ActionKind, Ai, DIRECTIONS, Engine, Entity, EntityId, GameMap, GameRng, MessageLog,
    Pos, SessionConfig, TileKind, TurnQueue, color,
};
use proptest::prelude::*;
use slotmap::SlotMap;

fn open_room(width: usize, height: usize) -> GameMap {
    let mut map = GameMap::new(width, height);
    for y in 1..height as i32 - 1 {
        for x in 1..width as i32 - 1 {
            map.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
    map
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tickets_pop_in_time_then_insertion_order(intervals in prop::collection::vec(0_u64..50, 1..40)) {
        let mut keys: SlotMap<EntityId, ()> = SlotMap::with_key();
        let mut queue = TurnQueue::new();
        for interval in &intervals {
            queue.schedule(keys.insert(()), *interval);
        }
        let mut previous = None;
        while let Ok(ticket) = queue.next() {
            if let Some((time, seq)) = previous {
                prop_assert!((ticket.time, ticket.seq) > (time, seq));
            }
            previous = Some((ticket.time, ticket.seq));
        }
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn hp_stays_clamped_and_death_happens_once(values in prop::collection::vec(-50_i32..80, 1..30)) {
        let mut orc = content::orc();
        let mut deaths = 0;
        for value in values {
            if orc.set_hp(value) {
                deaths += 1;
            }
            let hp = orc.as_actor().map(|a| a.fighter.hp()).unwrap_or(-1);
            prop_assert!((0..=10).contains(&hp));
        }
        prop_assert!(deaths <= 1);
        prop_assert_eq!(deaths == 1, !orc.is_alive());
    }

    #[test]
    fn stacked_counts_add_up(picks in prop::collection::vec(0_usize..3, 1..60)) {
        let texts = ["You hit.", "You miss.", "Ouch."];
        let mut log = MessageLog::new();
        for pick in &picks {
            log.add_message(texts[*pick], color::WHITE);
        }
        let total: u32 = log.messages().iter().map(|m| m.count).sum();
        prop_assert_eq!(total as usize, picks.len());
        for pair in log.messages().windows(2) {
            prop_assert_ne!(&pair[0].text, &pair[1].text);
        }
    }

    #[test]
    fn moves_either_land_exactly_or_change_nothing(
        steps in prop::collection::vec((-1_i32..=1, -1_i32..=1), 1..40)
    ) {
        let mut map = open_room(8, 6);
        map.set_tile(Pos { y: 2, x: 4 }, TileKind::Wall);
        let player = map.insert(content::player().spawned_at(Pos { y: 3, x: 3 })).expect("player");
        map.insert(content::orc().spawned_at(Pos { y: 3, x: 5 })).expect("orc");
        let mut engine = Engine::from_map(1, SessionConfig::default(), map, player).expect("session");

        for (dx, dy) in steps {
            let before = engine.player().map(|p| p.pos).expect("player");
            let result = Action::new(player, ActionKind::Move { dx, dy }).perform(&mut engine);
            let after = engine.player().map(|p| p.pos).expect("player");
            match result {
                Ok(()) => prop_assert_eq!(after, before.offset(dx, dy)),
                Err(_) => prop_assert_eq!(after, before),
            }
            prop_assert!(engine.map().is_walkable(after));
        }
    }

    #[test]
    fn bump_matches_the_explicit_action_in_every_direction(
        direction in 0..DIRECTIONS.len(),
        occupied in any::<bool>(),
        walled in any::<bool>(),
    ) {
        let (dx, dy) = DIRECTIONS[direction];
        let origin = Pos { y: 4, x: 4 };
        let session = || {
            let mut map = open_room(9, 9);
            if occupied {
                map.insert(content::orc().spawned_at(origin.offset(dx, dy))).expect("orc");
            } else if walled {
                map.set_tile(origin.offset(dx, dy), TileKind::Wall);
            }
            let player = map.insert(content::player().spawned_at(origin)).expect("player");
            let engine = Engine::from_map(5, SessionConfig::default(), map, player).expect("session");
            (engine, player)
        };
        let explicit = if occupied {
            ActionKind::MeleeAttack { dx, dy }
        } else {
            ActionKind::Move { dx, dy }
        };

        let (mut bumped, player) = session();
        let (mut direct, _) = session();
        let bump_result = Action::new(player, ActionKind::Bump { dx, dy }).perform(&mut bumped);
        let direct_result = Action::new(player, explicit).perform(&mut direct);

        prop_assert_eq!(bump_result, direct_result);
        prop_assert_eq!(bumped.snapshot_hash(), direct.snapshot_hash());
    }

    #[test]
    fn confusion_restores_the_original_ai_after_its_turns(turns in 1_u32..30, seed in any::<u64>()) {
        let map = open_room(10, 10);
        let original = Ai::Hostile { path: vec![Pos { y: 2, x: 2 }] };
        let mut ai = Ai::confused(original.clone(), turns);
        let mut rng = GameRng::seed_from_u64(seed);
        let view = AiView { map: &map, pos: Pos { y: 5, x: 5 }, player_pos: Pos { y: 1, x: 1 } };

        for step in 1..=turns {
            prop_assert!(ai.is_confused(), "still confused before step {}", step);
            let decision = ai.decide(&view, &mut rng);
            let is_bump = matches!(decision.action, ActionKind::Bump { .. });
            prop_assert!(is_bump);
            prop_assert_eq!(decision.recovered, step == turns);
        }
        prop_assert_eq!(ai, original);
    }
}

#[test]
fn living_entities_in_generated_floors_sit_on_walkable_tiles() {
    for seed in 0..32 {
        let engine = Engine::new(seed, &SessionConfig::default()).expect("engine");
        for (_, entity) in engine.map().entities() {
            assert!(engine.map().is_walkable(entity.pos), "seed {seed}: {}", entity.name);
        }
        assert!(engine.player().is_some_and(Entity::is_alive));
    }
}
