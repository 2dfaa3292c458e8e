//! HP changes that may end in death, with the matching log lines.

use super::*;

impl Engine {
    /// Subtracts `amount` from the target's HP, resolving death in the same step.
    pub fn apply_damage(&mut self, target: EntityId, amount: i32) {
        let Some(hp) = self.map.get(target).and_then(Entity::as_actor).map(|a| a.fighter.hp())
        else {
            return;
        };
        self.set_hp(target, hp - amount);
    }

    /// Sets the target's HP (clamped) and logs the death it may cause.
    pub fn set_hp(&mut self, target: EntityId, value: i32) {
        let is_player = target == self.player;
        let Some(entity) = self.map.get_mut(target) else {
            warn!(?target, "hp change for an entity that is not on the map");
            return;
        };
        let name = entity.name.clone();
        if !entity.set_hp(value) {
            return;
        }

        debug!(?target, %name, "actor died");
        if is_player {
            self.log.add_message("You died!", color::PLAYER_DIE);
        } else {
            self.log.add_message(format!("{name} is dead!"), color::ENEMY_DIE);
        }
    }
}
