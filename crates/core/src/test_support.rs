//! Shared fixtures for the unit test suites.

use crate::config::SessionConfig;
use crate::content;
use crate::engine::Engine;
use crate::entity::Entity;
use crate::map::GameMap;
use crate::tile::TileKind;
use crate::types::{EntityId, Pos};

/// A walled rectangle with open floor inside.
pub(crate) fn open_map(width: usize, height: usize) -> GameMap {
    let mut map = GameMap::new(width, height);
    for y in 1..height as i32 - 1 {
        for x in 1..width as i32 - 1 {
            map.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
    map
}

/// A fully revealed 12x12 room with only the player in it.
pub(crate) fn engine_with_player(at: Pos) -> (Engine, EntityId) {
    let mut map = open_map(12, 12);
    let player = map.insert(content::player().spawned_at(at)).expect("player in bounds");
    let mut engine =
        Engine::from_map(7, SessionConfig::default(), map, player).expect("valid fixture");
    engine.map.reveal_all();
    (engine, player)
}

pub(crate) fn hp_of(engine: &Engine, id: EntityId) -> i32 {
    engine.map.get(id).and_then(Entity::as_actor).map(|a| a.fighter.hp()).expect("actor")
}

pub(crate) fn pos_of(engine: &Engine, id: EntityId) -> Pos {
    engine.map.get(id).map(|e| e.pos).expect("entity on map")
}

pub(crate) fn inventory_len(engine: &Engine, id: EntityId) -> usize {
    engine.map.get(id).and_then(Entity::as_actor).map(|a| a.inventory.len()).expect("actor")
}
