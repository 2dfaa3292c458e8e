//! Descending to the next floor.
//! The old floor is discarded whole; only the player entity carries over,
//! inventory and wounds included.

use super::*;
use crate::tile::TileKind;

impl Engine {
    /// Descends when the player stands on down stairs.
    pub(super) fn take_stairs(&mut self) -> Result<Result<(), Impossible>, EngineError> {
        let on_stairs = self.player().is_some_and(|p| self.map.tile(p.pos) == TileKind::DownStairs);
        if !on_stairs {
            return Ok(Err(Impossible::new("There are no stairs here.")));
        }
        self.descend()?;
        Ok(Ok(()))
    }

    /// Generates the next floor with the session parameters and moves the
    /// player into it. The current floor is untouched if generation fails.
    pub fn descend(&mut self) -> Result<(), EngineError> {
        let player = self.player().cloned().ok_or(EngineError::MissingPlayer)?;
        let params = FloorParams::from(&self.config);
        let (map, player_id) = generate_floor(&params, player, &mut self.rng)?;

        self.map = map;
        self.player = player_id;
        self.current_floor += 1;
        self.reset_turn_queue();
        self.update_fov();
        self.log.add_message("You descend the staircase.", color::DESCEND);
        debug!(floor = self.current_floor, "descended");
        Ok(())
    }
}
