//! Single-use item effects.
//!
//! `activate` validates first and mutates second, so an `Err` leaves the
//! world exactly as it was and the item stays in the inventory.

use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::color;
use crate::engine::Engine;
use crate::error::Impossible;
use crate::types::{EntityId, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    Healing { amount: i32 },
    /// Hits the closest visible living actor within `maximum_range`.
    LightningDamage { damage: i32, maximum_range: u32 },
    Confusion { number_of_turns: u32 },
    /// Damages every living actor within `radius` of the target, user included.
    Fireball { damage: i32, radius: u32 },
}

impl Consumable {
    /// Whether the effect needs a map position chosen by the user.
    pub fn needs_target(&self) -> bool {
        matches!(self, Consumable::Confusion { .. } | Consumable::Fireball { .. })
    }

    pub fn activate(
        &self,
        engine: &mut Engine,
        user: EntityId,
        item_name: &str,
        target: Pos,
    ) -> Result<(), Impossible> {
        match *self {
            Consumable::Healing { amount } => heal(engine, user, item_name, amount),
            Consumable::LightningDamage { damage, maximum_range } => {
                lightning(engine, user, damage, maximum_range)
            }
            Consumable::Confusion { number_of_turns } => {
                confuse(engine, user, target, number_of_turns)
            }
            Consumable::Fireball { damage, radius } => fireball(engine, target, damage, radius),
        }
    }
}

fn heal(engine: &mut Engine, user: EntityId, item_name: &str, amount: i32) -> Result<(), Impossible> {
    let recovered = engine
        .map
        .get_mut(user)
        .and_then(|entity| entity.as_actor_mut())
        .map(|actor| actor.fighter.heal(amount))
        .unwrap_or(0);
    if recovered == 0 {
        return Err(Impossible::new("Your health is already full."));
    }
    engine.log.add_message(
        format!("You consume the {item_name}, and recover {recovered} HP!"),
        color::HEALTH_RECOVERED,
    );
    Ok(())
}

fn lightning(
    engine: &mut Engine,
    user: EntityId,
    damage: i32,
    maximum_range: u32,
) -> Result<(), Impossible> {
    let Some(origin) = engine.map.get(user).map(|e| e.pos) else {
        return Err(Impossible::new("No enemy is close enough to strike."));
    };

    let mut closest: Option<(EntityId, f64)> = None;
    for (id, entity) in engine.map.living_actors() {
        if id == user || !engine.map.is_visible(entity.pos) {
            continue;
        }
        let distance = origin.distance(entity.pos);
        if distance > f64::from(maximum_range) {
            continue;
        }
        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((id, distance));
        }
    }
    let Some((target, _)) = closest else {
        return Err(Impossible::new("No enemy is close enough to strike."));
    };

    let name = engine.map.get(target).map(|e| e.name.clone()).unwrap_or_default();
    engine.log.add_message(
        format!("A lightning bolt strikes the {name} with a loud thunder, for {damage} damage!"),
        color::WHITE,
    );
    engine.apply_damage(target, damage);
    Ok(())
}

fn confuse(
    engine: &mut Engine,
    user: EntityId,
    target: Pos,
    number_of_turns: u32,
) -> Result<(), Impossible> {
    if !engine.map.is_visible(target) {
        return Err(Impossible::new("You cannot target an area that you cannot see."));
    }
    let Some(victim) = engine.map.actor_at(target) else {
        return Err(Impossible::new("You must select an enemy to target."));
    };
    if victim == user {
        return Err(Impossible::new("You cannot confuse yourself!"));
    }
    let Some(entity) = engine.map.get_mut(victim) else {
        return Err(Impossible::new("You must select an enemy to target."));
    };
    let name = entity.name.clone();
    if let Some(actor) = entity.as_actor_mut()
        && let Some(previous) = actor.ai.take()
    {
        actor.ai = Some(Ai::confused(previous, number_of_turns));
    }
    engine.log.add_message(
        format!("The eyes of the {name} look vacant, as it starts to stumble around!"),
        color::STATUS_EFFECT_APPLIED,
    );
    Ok(())
}

fn fireball(engine: &mut Engine, target: Pos, damage: i32, radius: u32) -> Result<(), Impossible> {
    if !engine.map.is_visible(target) {
        return Err(Impossible::new("You cannot target an area that you cannot see."));
    }
    let caught: Vec<(EntityId, String)> = engine
        .map
        .living_actors()
        .filter(|(_, e)| e.pos.distance(target) <= f64::from(radius))
        .map(|(id, e)| (id, e.name.clone()))
        .collect();
    if caught.is_empty() {
        return Err(Impossible::new("There are no targets in the radius."));
    }
    for (id, name) in caught {
        engine.log.add_message(
            format!("The {name} is engulfed in a fiery explosion, taking {damage} damage!"),
            color::PLAYER_ATK,
        );
        engine.apply_damage(id, damage);
    }
    Ok(())
}
