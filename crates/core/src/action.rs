//! Intents bound to an acting entity, validated against the map and applied.
//!
//! Every variant checks all of its preconditions before touching state, so
//! an `Impossible` result means nothing changed.

use serde::{Deserialize, Serialize};

use crate::color;
use crate::engine::Engine;
use crate::error::Impossible;
use crate::types::{EntityId, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Move { dx: i32, dy: i32 },
    MeleeAttack { dx: i32, dy: i32 },
    /// Attacks a living actor in that direction, otherwise moves there.
    Bump { dx: i32, dy: i32 },
    Wait,
    PickUp,
    /// `target` defaults to the user's own position.
    UseItem { item: usize, target: Option<Pos> },
    DropItem { item: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: EntityId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn perform(&self, engine: &mut Engine) -> Result<(), Impossible> {
        match self.kind {
            ActionKind::Move { dx, dy } => {
                single_step(dx, dy)?;
                self.move_by(engine, dx, dy)
            }
            ActionKind::MeleeAttack { dx, dy } => {
                single_step(dx, dy)?;
                self.melee(engine, dx, dy)
            }
            ActionKind::Bump { dx, dy } => {
                single_step(dx, dy)?;
                let dest = self.actor_pos(engine)?.offset(dx, dy);
                if engine.map.actor_at(dest).is_some() {
                    self.melee(engine, dx, dy)
                } else {
                    self.move_by(engine, dx, dy)
                }
            }
            ActionKind::Wait => Ok(()),
            ActionKind::PickUp => self.pick_up(engine),
            ActionKind::UseItem { item, target } => self.use_item(engine, item, target),
            ActionKind::DropItem { item } => self.drop_item(engine, item),
        }
    }

    fn actor_pos(&self, engine: &Engine) -> Result<Pos, Impossible> {
        engine
            .map
            .get(self.actor)
            .map(|e| e.pos)
            .ok_or_else(|| Impossible::new("There is no one here to act."))
    }

    fn move_by(&self, engine: &mut Engine, dx: i32, dy: i32) -> Result<(), Impossible> {
        let dest = self.actor_pos(engine)?.offset(dx, dy);
        if !engine.map.in_bounds(dest)
            || !engine.map.is_walkable(dest)
            || engine.map.blocking_entity_at(dest).is_some()
        {
            return Err(Impossible::new("That way is blocked."));
        }
        if let Some(entity) = engine.map.get_mut(self.actor) {
            entity.pos = dest;
        }
        Ok(())
    }

    fn melee(&self, engine: &mut Engine, dx: i32, dy: i32) -> Result<(), Impossible> {
        let dest = self.actor_pos(engine)?.offset(dx, dy);
        let Some(target) = engine.map.actor_at(dest) else {
            return Err(Impossible::new("Nothing to attack."));
        };
        let (Some(attacker), Some(defender)) = (engine.map.get(self.actor), engine.map.get(target))
        else {
            return Err(Impossible::new("Nothing to attack."));
        };
        let (Some(attacking), Some(defending)) = (attacker.as_actor(), defender.as_actor()) else {
            return Err(Impossible::new("Nothing to attack."));
        };

        let damage = attacking.fighter.power - defending.fighter.defense;
        let description = format!("{} attacks {}", attacker.name, defender.name);
        let fg = if self.actor == engine.player { color::PLAYER_ATK } else { color::ENEMY_ATK };
        if damage > 0 {
            engine.log.add_message(format!("{description} for {damage} hit points."), fg);
            engine.apply_damage(target, damage);
        } else {
            engine.log.add_message(format!("{description} but does no damage."), fg);
        }
        Ok(())
    }

    fn pick_up(&self, engine: &mut Engine) -> Result<(), Impossible> {
        let pos = self.actor_pos(engine)?;
        let Some(item_id) = engine.map.item_at(pos) else {
            return Err(Impossible::new("There is nothing here to pick up."));
        };
        let full = engine
            .map
            .get(self.actor)
            .and_then(|e| e.as_actor())
            .is_none_or(|actor| actor.inventory.is_full());
        if full {
            return Err(Impossible::new("Your inventory is full."));
        }

        let Some(item) = engine.map.remove(item_id) else {
            return Err(Impossible::new("There is nothing here to pick up."));
        };
        let name = item.name.clone();
        let stored = match engine.map.get_mut(self.actor).and_then(|e| e.as_actor_mut()) {
            Some(actor) => actor.inventory.add(item),
            None => Err(item),
        };
        if let Err(item) = stored {
            // The item still carries the cell it was lifted from.
            engine.map.insert(item).map_err(|err| Impossible::new(err.to_string()))?;
            return Err(Impossible::new("Your inventory is full."));
        }
        engine.log.add_message(format!("You picked up the {name}!"), color::WHITE);
        Ok(())
    }

    fn use_item(
        &self,
        engine: &mut Engine,
        index: usize,
        target: Option<Pos>,
    ) -> Result<(), Impossible> {
        let pos = self.actor_pos(engine)?;
        let (consumable, name) = engine
            .map
            .get(self.actor)
            .and_then(|e| e.as_actor())
            .and_then(|actor| actor.inventory.get(index))
            .and_then(|item| Some((item.as_item()?.consumable.clone(), item.name.clone())))
            .ok_or_else(|| Impossible::new("There is no item in that slot."))?;

        consumable.activate(engine, self.actor, &name, target.unwrap_or(pos))?;

        if let Some(actor) = engine.map.get_mut(self.actor).and_then(|e| e.as_actor_mut()) {
            actor.inventory.take(index);
        }
        Ok(())
    }

    fn drop_item(&self, engine: &mut Engine, index: usize) -> Result<(), Impossible> {
        let pos = self.actor_pos(engine)?;
        // Checked before the item leaves the inventory so a refused drop loses nothing.
        if !engine.map.in_bounds(pos) {
            return Err(Impossible::new("There is no room to drop that here."));
        }
        let Some(mut item) = engine
            .map
            .get_mut(self.actor)
            .and_then(|e| e.as_actor_mut())
            .and_then(|actor| actor.inventory.take(index))
        else {
            return Err(Impossible::new("There is no item in that slot."));
        };
        item.pos = pos;
        let name = item.name.clone();
        engine.map.insert(item).map_err(|err| Impossible::new(err.to_string()))?;
        engine.log.add_message(format!("You dropped the {name}."), color::WHITE);
        Ok(())
    }
}

/// Directional actions reach exactly one neighbouring cell.
fn single_step(dx: i32, dy: i32) -> Result<(), Impossible> {
    if (dx, dy) == (0, 0) || dx.abs() > 1 || dy.abs() > 1 {
        return Err(Impossible::new("That is not a single step."));
    }
    Ok(())
}
