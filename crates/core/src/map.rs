//! Tiles, visibility bitmaps and the entity arena of one floor.
//! This module exists to answer spatial queries and export pathfinding and sight grids.
//! It does not own action resolution or turn order.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::entity::Entity;
use crate::error::MapError;
use crate::grid::Grid;
use crate::pathfinding::CostGrid;
use crate::tile::{SHROUD, TileKind};
use crate::types::{EntityId, Pos};

/// Extra path cost for a cell holding a blocking entity. Monsters route
/// around each other when a detour is cheap, but still queue up in corridors.
const BLOCKER_PATH_COST: u16 = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameMap {
    tiles: Grid<TileKind>,
    visible: Grid<bool>,
    explored: Grid<bool>,
    entities: SlotMap<EntityId, Entity>,
}

impl GameMap {
    /// A solid map; generation carves floors into it.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: Grid::new(width, height, TileKind::Wall),
            visible: Grid::new(width, height, false),
            explored: Grid::new(width, height, false),
            entities: SlotMap::with_key(),
        }
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.tiles.in_bounds(pos)
    }

    /// Tile at `pos`; everything outside the map reads as wall.
    pub fn tile(&self, pos: Pos) -> TileKind {
        self.tiles.at(pos)
    }

    pub fn set_tile(&mut self, pos: Pos, kind: TileKind) {
        self.tiles.set(pos, kind);
    }

    pub fn tiles(&self) -> &Grid<TileKind> {
        &self.tiles
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile(pos).is_walkable()
    }

    pub fn is_transparent(&self, pos: Pos) -> bool {
        self.tile(pos).is_transparent()
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.visible.at(pos)
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.explored.at(pos)
    }

    pub fn visible(&self) -> &Grid<bool> {
        &self.visible
    }

    pub fn explored(&self) -> &Grid<bool> {
        &self.explored
    }

    /// Replaces the visible set and folds it into `explored`.
    pub fn set_visible(&mut self, visible: Grid<bool>) {
        for (pos, seen) in visible.iter() {
            if *seen {
                self.explored.set(pos, true);
            }
        }
        self.visible = visible;
    }

    /// Marks every cell visible and explored.
    pub fn reveal_all(&mut self) {
        self.visible.fill(true);
        self.explored.fill(true);
    }

    pub fn stairs_pos(&self) -> Option<Pos> {
        self.tiles.iter().find(|(_, kind)| **kind == TileKind::DownStairs).map(|(pos, _)| pos)
    }

    pub fn insert(&mut self, entity: Entity) -> Result<EntityId, MapError> {
        if !self.in_bounds(entity.pos) {
            return Err(MapError::OutOfBounds(entity.pos));
        }
        Ok(self.entities.insert(entity))
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn blocking_entity_at(&self, pos: Pos) -> Option<EntityId> {
        self.entities.iter().find(|(_, e)| e.blocks_movement && e.pos == pos).map(|(id, _)| id)
    }

    /// The living actor standing at `pos`, if any. Corpses are ignored.
    pub fn actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.entities.iter().find(|(_, e)| e.pos == pos && e.is_alive()).map(|(id, _)| id)
    }

    /// The first item lying at `pos`.
    pub fn item_at(&self, pos: Pos) -> Option<EntityId> {
        self.items().find(|(_, e)| e.pos == pos).map(|(id, _)| id)
    }

    pub fn items(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().filter(|(_, e)| e.as_item().is_some())
    }

    pub fn living_actors(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().filter(|(_, e)| e.is_alive())
    }

    /// Entities on visible cells, painted bottom-up by render tier.
    pub fn render_entities(&self) -> Vec<&Entity> {
        let mut shown: Vec<&Entity> =
            self.entities.values().filter(|e| self.is_visible(e.pos)).collect();
        shown.sort_by_key(|e| e.render_order);
        shown
    }

    /// Path costs: 0 for walls, 1 for open floor, plus a penalty per blocker.
    pub fn cost_grid(&self) -> CostGrid {
        let mut cost = Grid::new(self.width(), self.height(), 0_u16);
        for (pos, kind) in self.tiles.iter() {
            if kind.is_walkable() {
                cost.set(pos, 1);
            }
        }
        for entity in self.entities.values().filter(|e| e.blocks_movement) {
            if let Some(cell) = cost.get_mut(entity.pos)
                && *cell > 0
            {
                *cell += BLOCKER_PATH_COST;
            }
        }
        cost
    }

    pub fn transparency(&self) -> Grid<bool> {
        let mut transparent = Grid::new(self.width(), self.height(), false);
        for (pos, kind) in self.tiles.iter() {
            transparent.set(pos, kind.is_transparent());
        }
        transparent
    }

    /// Plain-text frame: lit tiles and visible entities, remembered tiles, shroud.
    pub fn draw_ascii(&self) -> String {
        let mut frame = Grid::new(self.width(), self.height(), SHROUD.glyph);
        for (pos, kind) in self.tiles.iter() {
            let tile = kind.tile();
            if self.is_visible(pos) {
                frame.set(pos, tile.light.glyph);
            } else if self.is_explored(pos) {
                frame.set(pos, tile.dark.glyph);
            }
        }
        for entity in self.render_entities() {
            frame.set(entity.pos, entity.glyph);
        }

        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in frame.cells().chunks(self.width().max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}
