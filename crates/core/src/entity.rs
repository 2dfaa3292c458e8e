//! Placeable objects and their capability components.
//!
//! An `Entity` value is owned by exactly one container: the entity arena of a
//! `GameMap`, or the item list of an actor's `Inventory`. Moving an entity
//! between containers moves the value, so it can never be in both.

use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::color;
use crate::consumable::Consumable;
use crate::types::{Pos, RenderOrder, Rgb};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Pos,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Actor(Actor),
    Item(Item),
}

/// Combat, storage and behaviour bundled on one character.
///
/// `ai` doubles as the liveness flag: an actor without one is a corpse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub fighter: Fighter,
    pub inventory: Inventory,
    pub ai: Option<Ai>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub consumable: Consumable,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    max_hp: i32,
    hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self { max_hp: hp, hp, defense, power }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Restores up to `amount` HP and returns how much was actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    // Only reachable through `Entity::set_hp`, which owns the death transition.
    fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    items: Vec<Entity>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, items: Vec::new() }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    /// Stores `item`, handing it back unchanged when there is no room.
    pub fn add(&mut self, item: Entity) -> Result<(), Entity> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn take(&mut self, index: usize) -> Option<Entity> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

impl Entity {
    pub fn actor(
        glyph: char,
        color: Rgb,
        name: &str,
        fighter: Fighter,
        inventory: Inventory,
        ai: Ai,
    ) -> Self {
        Self {
            pos: Pos { y: 0, x: 0 },
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(Actor { fighter, inventory, ai: Some(ai) }),
        }
    }

    pub fn item(glyph: char, color: Rgb, name: &str, consumable: Consumable) -> Self {
        Self {
            pos: Pos { y: 0, x: 0 },
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(Item { consumable }),
        }
    }

    /// A copy of this template placed at `pos`.
    pub fn spawned_at(&self, pos: Pos) -> Self {
        Self { pos, ..self.clone() }
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match &self.kind {
            EntityKind::Item(item) => Some(item),
            EntityKind::Actor(_) => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.as_actor().is_some_and(|actor| actor.ai.is_some())
    }

    /// Sets HP (clamped to `[0, max_hp]`) and resolves death in the same step.
    ///
    /// Returns `true` only on the call that killed the actor. The AI is
    /// cleared before anything else, so a second call at 0 HP is a no-op.
    pub fn set_hp(&mut self, value: i32) -> bool {
        let Some(actor) = self.as_actor_mut() else {
            return false;
        };
        actor.fighter.set_hp(value);
        if actor.fighter.hp() > 0 || actor.ai.take().is_none() {
            return false;
        }

        self.glyph = '%';
        self.color = color::CORPSE;
        self.blocks_movement = false;
        self.render_order = RenderOrder::Corpse;
        self.name = format!("remains of {}", self.name);
        true
    }
}
