//! Stable snapshot hashing for determinism checks.
//! This module exists to keep hashing concerns separate from turn flow.
//! It does not own save file integrity, which is checked with SHA-256 in `save`.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::entity::EntityKind;
use crate::tile::TileKind;

impl Engine {
    /// Digest of the observable session state: clocks, queued tickets, the random stream,
    /// tiles, every entity with its components, and the message log.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.current_floor);
        hasher.write_u64(self.turns.time());
        hasher.write_usize(self.turns.len());
        for ticket in self.turns.tickets() {
            hasher.write_u64(ticket.time);
            hasher.write_u64(ticket.seq);
        }
        hasher.write_u128(self.rng.word_pos());

        for (_, kind) in self.map.tiles().iter() {
            hasher.write_u8(match kind {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::DownStairs => 2,
            });
        }
        for (_, entity) in self.map.entities() {
            hash_entity(&mut hasher, entity);
        }

        hasher.write_usize(self.log.len());
        for message in self.log.messages() {
            hasher.write(message.text.as_bytes());
            hasher.write_u32(message.count);
        }
        hasher.finish()
    }
}

fn hash_entity(hasher: &mut Xxh3, entity: &Entity) {
    hasher.write_i32(entity.pos.x);
    hasher.write_i32(entity.pos.y);
    hasher.write_u32(u32::from(entity.glyph));
    hasher.write(entity.name.as_bytes());
    hasher.write_u8(u8::from(entity.blocks_movement));
    match &entity.kind {
        EntityKind::Actor(actor) => {
            hasher.write_i32(actor.fighter.hp());
            hasher.write_i32(actor.fighter.max_hp());
            hasher.write_i32(actor.fighter.power);
            hasher.write_i32(actor.fighter.defense);
            hasher.write_u8(u8::from(actor.ai.is_some()));
            hasher.write_u8(u8::from(actor.ai.as_ref().is_some_and(|ai| ai.is_confused())));
            hasher.write_usize(actor.inventory.len());
            for item in actor.inventory.items() {
                hasher.write(item.name.as_bytes());
            }
        }
        EntityKind::Item(_) => hasher.write_u8(0xFF),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sessions_hash_identically() {
        let config = SessionConfig::default();
        let left = Engine::new(77, &config).expect("engine");
        let right = Engine::new(77, &config).expect("engine");
        assert_eq!(left.snapshot_hash(), right.snapshot_hash());
    }

    #[test]
    fn hash_changes_when_the_player_moves() {
        let config = SessionConfig::default();
        let mut engine = Engine::new(77, &config).expect("engine");
        let before = engine.snapshot_hash();
        let player = engine.player_id();
        if let Some(entity) = engine.map.get_mut(player) {
            entity.pos = entity.pos.offset(1, 0);
        }
        assert_ne!(engine.snapshot_hash(), before);
    }

    #[test]
    fn hash_covers_ticket_order_not_just_queue_length() {
        let config = SessionConfig::default();
        let mut engines =
            [Engine::new(77, &config).expect("engine"), Engine::new(77, &config).expect("engine")];
        for engine in &mut engines {
            let at = engine.player().map(|e| e.pos).expect("player");
            engine.map.insert(content::orc().spawned_at(at)).expect("orc");
            engine.reset_turn_queue();
        }
        let [left, right] = &mut engines;
        assert_eq!(left.snapshot_hash(), right.snapshot_hash());

        let ticket = right.turns.next().expect("a queued enemy");
        right.turns.schedule(ticket.actor, 0);
        assert_eq!(left.turns.len(), right.turns.len());
        assert_ne!(left.snapshot_hash(), right.snapshot_hash());
    }
}
