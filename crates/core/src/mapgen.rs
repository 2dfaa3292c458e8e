//! Rooms-and-corridors floor generation.

mod layout;

use tracing::debug;

use crate::config::SessionConfig;
use crate::content;
use crate::entity::Entity;
use crate::error::MapError;
use crate::map::GameMap;
use crate::rng::GameRng;
use crate::tile::TileKind;
use crate::types::{EntityId, Pos};

use layout::{RoomRect, carve_tunnel};

const ORC_PERCENT: u32 = 80;
const HEALTH_POTION_PERCENT: usize = 70;
const FIREBALL_PERCENT: usize = 80;
const CONFUSION_PERCENT: usize = 90;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorParams {
    pub width: usize,
    pub height: usize,
    pub room_min_size: usize,
    pub room_max_size: usize,
    pub max_rooms: usize,
    pub max_monsters_per_room: usize,
    pub max_items_per_room: usize,
}

impl From<&SessionConfig> for FloorParams {
    fn from(config: &SessionConfig) -> Self {
        Self {
            width: config.map_width,
            height: config.map_height,
            room_min_size: config.room_min_size,
            room_max_size: config.room_max_size,
            max_rooms: config.max_rooms,
            max_monsters_per_room: config.max_monsters_per_room,
            max_items_per_room: config.max_items_per_room,
        }
    }
}

/// Builds a floor and places `player` at the center of the first room.
///
/// Down stairs go to the center of the last room placed. Returns the map and
/// the player's id in it.
pub fn generate_floor(
    params: &FloorParams,
    player: Entity,
    rng: &mut GameRng,
) -> Result<(GameMap, EntityId), MapError> {
    let mut map = GameMap::new(params.width, params.height);
    let mut tiles = map.tiles().clone();
    let mut rooms: Vec<RoomRect> = Vec::new();
    let mut player_id = None;

    for _ in 0..params.max_rooms {
        let room_width = rng.range_inclusive(params.room_min_size, params.room_max_size);
        let room_height = rng.range_inclusive(params.room_min_size, params.room_max_size);
        let x = rng.range_inclusive(0, params.width.saturating_sub(room_width + 1));
        let y = rng.range_inclusive(0, params.height.saturating_sub(room_height + 1));
        let room = RoomRect::new(x, y, room_width, room_height);
        if rooms.iter().any(|other| room.intersects(other)) {
            continue;
        }

        room.carve(&mut tiles);
        match rooms.last() {
            None => {
                player_id = Some(map.insert(player.spawned_at(room.center()))?);
            }
            Some(previous) => carve_tunnel(&mut tiles, previous.center(), room.center(), rng),
        }
        rooms.push(room);
    }

    for (pos, kind) in tiles.iter() {
        map.set_tile(pos, *kind);
    }
    for room in &rooms {
        place_monsters(&mut map, *room, params.max_monsters_per_room, rng)?;
        place_items(&mut map, *room, params.max_items_per_room, rng)?;
    }
    let stairs = rooms.last().map(|room| room.center());
    if let Some(stairs) = stairs {
        map.set_tile(stairs, TileKind::DownStairs);
    }

    // The first room is always accepted, so the player is always placed.
    let player_id = match player_id {
        Some(id) => id,
        None => map.insert(player.spawned_at(Pos { y: 1, x: 1 }))?,
    };
    debug!(
        rooms = rooms.len(),
        entities = map.entity_count(),
        ?stairs,
        word_pos = rng.word_pos(),
        "generated floor"
    );
    Ok((map, player_id))
}

fn is_free(map: &GameMap, pos: Pos) -> bool {
    map.entities().all(|(_, e)| e.pos != pos)
}

fn place_monsters(
    map: &mut GameMap,
    room: RoomRect,
    maximum: usize,
    rng: &mut GameRng,
) -> Result<(), MapError> {
    for _ in 0..rng.range_inclusive(0, maximum) {
        let pos = room.random_interior(rng);
        if !is_free(map, pos) {
            continue;
        }
        let template = if rng.percent(ORC_PERCENT) { content::orc() } else { content::troll() };
        map.insert(template.spawned_at(pos))?;
    }
    Ok(())
}

fn place_items(
    map: &mut GameMap,
    room: RoomRect,
    maximum: usize,
    rng: &mut GameRng,
) -> Result<(), MapError> {
    for _ in 0..rng.range_inclusive(0, maximum) {
        let pos = room.random_interior(rng);
        if !is_free(map, pos) {
            continue;
        }
        let roll = rng.below(100);
        let template = if roll < HEALTH_POTION_PERCENT {
            content::health_potion()
        } else if roll < FIREBALL_PERCENT {
            content::fireball_scroll()
        } else if roll < CONFUSION_PERCENT {
            content::confusion_scroll()
        } else {
            content::lightning_scroll()
        };
        map.insert(template.spawned_at(pos))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FloorParams {
        FloorParams::from(&SessionConfig::default())
    }

    #[test]
    fn same_seed_generates_the_same_floor() {
        let (left, _) =
            generate_floor(&params(), content::player(), &mut GameRng::seed_from_u64(11))
                .expect("floor");
        let (right, _) =
            generate_floor(&params(), content::player(), &mut GameRng::seed_from_u64(11))
                .expect("floor");
        assert_eq!(left.tiles(), right.tiles());
        assert_eq!(left.draw_ascii(), right.draw_ascii());
        assert_eq!(left.entity_count(), right.entity_count());
    }

    #[test]
    fn player_starts_on_walkable_floor_and_stairs_exist() {
        for seed in 0..20 {
            let (map, player) =
                generate_floor(&params(), content::player(), &mut GameRng::seed_from_u64(seed))
                    .expect("floor");
            let pos = map.get(player).map(|e| e.pos).expect("player placed");
            assert!(map.is_walkable(pos), "seed {seed}");
            assert!(map.stairs_pos().is_some(), "seed {seed}");
        }
    }

    #[test]
    fn no_two_entities_share_a_spawn_cell() {
        for seed in 0..20 {
            let (map, _) =
                generate_floor(&params(), content::player(), &mut GameRng::seed_from_u64(seed))
                    .expect("floor");
            let mut positions: Vec<Pos> = map.entities().map(|(_, e)| e.pos).collect();
            let total = positions.len();
            positions.sort();
            positions.dedup();
            assert_eq!(positions.len(), total, "seed {seed}");
            assert!(map.entities().all(|(_, e)| map.is_walkable(e.pos)), "seed {seed}");
        }
    }

    #[test]
    fn map_border_stays_solid() {
        let (map, _) =
            generate_floor(&params(), content::player(), &mut GameRng::seed_from_u64(3))
                .expect("floor");
        for x in 0..map.width() as i32 {
            assert_eq!(map.tile(Pos { y: 0, x }), TileKind::Wall);
            assert_eq!(map.tile(Pos { y: map.height() as i32 - 1, x }), TileKind::Wall);
        }
        for y in 0..map.height() as i32 {
            assert_eq!(map.tile(Pos { y, x: 0 }), TileKind::Wall);
            assert_eq!(map.tile(Pos { y, x: map.width() as i32 - 1 }), TileKind::Wall);
        }
    }
}
