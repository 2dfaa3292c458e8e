//! Player intent dispatch and the enemy-turn loop.
//!
//! While the engine waits for input the player's ticket is not queued.
//! A resolved player action queues it `action_cost` ahead; every ticket due
//! before it is then served, which ends exactly when it pops again.

use tracing::trace;

use super::*;
use crate::action::Action;
use crate::ai::AiView;

impl Engine {
    pub fn handle_intent(&mut self, intent: Intent) -> Result<TurnOutcome, EngineError> {
        if intent == Intent::Escape {
            return Ok(TurnOutcome::Quit);
        }
        if !self.is_player_alive() {
            return Ok(TurnOutcome::PlayerDead);
        }

        let resolved = match intent {
            Intent::Action(kind) => Action::new(self.player, kind).perform(self),
            Intent::TakeStairs => self.take_stairs()?,
            Intent::Escape => return Ok(TurnOutcome::Quit),
        };
        if let Err(impossible) = resolved {
            return Ok(self.reject(impossible));
        }
        debug!(?intent, time = self.turns.time(), "player acted");

        self.turns.schedule(self.player, self.config.action_cost);
        self.handle_enemy_turns()?;
        self.update_fov();

        if self.is_player_alive() { Ok(TurnOutcome::Acted) } else { Ok(TurnOutcome::PlayerDead) }
    }

    /// Serves queued tickets until the player's comes up again.
    ///
    /// Stops early once the player dies, leaving the remaining tickets queued.
    pub fn handle_enemy_turns(&mut self) -> Result<(), EngineError> {
        loop {
            let ticket = self.turns.next()?;
            trace!(time = ticket.time, seq = ticket.seq, actor = ?ticket.actor, "ticket popped");
            if ticket.actor == self.player {
                return Ok(());
            }
            if !self.map.get(ticket.actor).is_some_and(Entity::is_alive) {
                trace!(actor = ?ticket.actor, "skipping ticket of a dead or removed actor");
                continue;
            }

            self.take_enemy_turn(ticket.actor);

            if self.map.get(ticket.actor).is_some_and(Entity::is_alive) {
                self.turns.schedule(ticket.actor, self.config.action_cost);
            }
            if !self.is_player_alive() {
                return Ok(());
            }
        }
    }

    fn take_enemy_turn(&mut self, id: EntityId) {
        let Some(player_pos) = self.player().map(|e| e.pos) else {
            return;
        };
        let Some(entity) = self.map.get_mut(id) else {
            return;
        };
        let pos = entity.pos;
        let name = entity.name.clone();
        // The AI is lifted out while it reads the map and put back before
        // the chosen action resolves.
        let Some(mut ai) = entity.as_actor_mut().and_then(|actor| actor.ai.take()) else {
            return;
        };
        let view = AiView { map: &self.map, pos, player_pos };
        let decision = ai.decide(&view, &mut self.rng);
        if let Some(actor) = self.map.get_mut(id).and_then(Entity::as_actor_mut) {
            actor.ai = Some(ai);
        }

        if decision.recovered {
            self.log.add_message(format!("The {name} is no longer confused."), color::WHITE);
        }
        debug!(actor = ?id, %name, action = ?decision.action, "enemy decided");
        if let Err(impossible) = Action::new(id, decision.action).perform(self) {
            trace!(actor = ?id, reason = impossible.reason(), "enemy action failed");
        }
    }
}
