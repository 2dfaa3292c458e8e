//! Session state and the entry point that turns player intents into turns.
//! This module exists to keep the floor, turn queue, log and random stream in one owner.
//! It does not own action rules or AI choices. Submodules hold turn flow and descent.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::ActionKind;
use crate::color;
use crate::config::SessionConfig;
use crate::content;
use crate::entity::Entity;
use crate::error::{EngineError, Impossible};
use crate::map::GameMap;
use crate::mapgen::{FloorParams, generate_floor};
use crate::message_log::MessageLog;
use crate::rng::GameRng;
use crate::scheduler::TurnQueue;
use crate::types::{EntityId, TurnOutcome};
use crate::visibility::compute_visible;

mod combat;
mod floor_transition;
mod hash;
mod turns;

/// One request from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Action(ActionKind),
    TakeStairs,
    Escape,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Engine {
    pub(crate) seed: u64,
    pub(crate) config: SessionConfig,
    pub(crate) rng: GameRng,
    pub(crate) map: GameMap,
    pub(crate) player: EntityId,
    pub(crate) turns: TurnQueue,
    pub(crate) log: MessageLog,
    pub(crate) current_floor: u32,
}

impl Engine {
    /// Generates floor 1 for `seed` and readies the first player turn.
    pub fn new(seed: u64, config: &SessionConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = GameRng::seed_from_u64(seed);
        let (map, player) = generate_floor(&FloorParams::from(config), content::player(), &mut rng)?;
        let mut engine = Self::assemble(seed, config.clone(), rng, map, player);
        engine.log.add_message_unstacked(
            "Hello and welcome, adventurer, to yet another dungeon!",
            color::WELCOME_TEXT,
        );
        debug!(seed, floor = engine.current_floor, "session started");
        Ok(engine)
    }

    /// Wraps a prepared map. `player` must already be placed in it.
    pub fn from_map(
        seed: u64,
        config: SessionConfig,
        map: GameMap,
        player: EntityId,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if !map.get(player).is_some_and(Entity::is_alive) {
            return Err(EngineError::MissingPlayer);
        }
        Ok(Self::assemble(seed, config, GameRng::seed_from_u64(seed), map, player))
    }

    fn assemble(
        seed: u64,
        config: SessionConfig,
        rng: GameRng,
        map: GameMap,
        player: EntityId,
    ) -> Self {
        let mut engine = Self {
            seed,
            config,
            rng,
            map,
            player,
            turns: TurnQueue::new(),
            log: MessageLog::new(),
            current_floor: 1,
        };
        engine.reset_turn_queue();
        engine.update_fov();
        engine
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut GameMap {
        &mut self.map
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn player(&self) -> Option<&Entity> {
        self.map.get(self.player)
    }

    pub fn is_player_alive(&self) -> bool {
        self.player().is_some_and(Entity::is_alive)
    }

    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    pub fn turn_queue(&self) -> &TurnQueue {
        &self.turns
    }

    /// Recomputes the player's field of view and folds it into explored.
    pub fn update_fov(&mut self) {
        let Some(origin) = self.player().map(|e| e.pos) else {
            warn!("no player on the map; field of view left unchanged");
            return;
        };
        let visible = compute_visible(&self.map.transparency(), origin, self.config.fov_radius);
        self.map.set_visible(visible);
    }

    /// Drops every ticket and queues each living non-player actor to act
    /// before the player's next action resolves.
    pub(crate) fn reset_turn_queue(&mut self) {
        self.turns.clear();
        let player = self.player;
        let enemies: Vec<EntityId> =
            self.map.living_actors().map(|(id, _)| id).filter(|id| *id != player).collect();
        for id in enemies {
            self.turns.schedule(id, 0);
        }
    }

    fn reject(&mut self, impossible: Impossible) -> TurnOutcome {
        debug!(reason = impossible.reason(), "player action rejected");
        self.log.add_message(impossible.reason(), color::IMPOSSIBLE);
        TurnOutcome::Rejected(impossible.0)
    }
}
