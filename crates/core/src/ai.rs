//! Per-actor decision making for hostile and confused actors.
//! This module exists so enemies choose through the same action kinds the player's input uses.
//! It does not own action resolution. The engine performs whatever a decision returns.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::map::GameMap;
use crate::pathfinding::find_path;
use crate::rng::GameRng;
use crate::types::{DIRECTIONS, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    /// Driven by input; the scheduler never asks it for a decision.
    Player,
    /// Chases the player, caching the path between sightings.
    Hostile { path: Vec<Pos> },
    /// Stumbles randomly, then hands control back to `previous`.
    Confused { previous: Box<Ai>, turns_remaining: u32 },
}

/// What an actor sees when deciding.
pub struct AiView<'a> {
    pub map: &'a GameMap,
    pub pos: Pos,
    pub player_pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: ActionKind,
    /// Set when a confusion wore off during this step.
    pub recovered: bool,
}

impl Decision {
    fn act(action: ActionKind) -> Self {
        Self { action, recovered: false }
    }
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile { path: Vec::new() }
    }

    pub fn confused(previous: Ai, turns_remaining: u32) -> Self {
        Ai::Confused { previous: Box::new(previous), turns_remaining }
    }

    pub fn is_confused(&self) -> bool {
        matches!(self, Ai::Confused { .. })
    }

    pub fn decide(&mut self, view: &AiView<'_>, rng: &mut GameRng) -> Decision {
        match self {
            Ai::Player => Decision::act(ActionKind::Wait),
            Ai::Hostile { path } => Decision::act(pursue(path, view)),
            Ai::Confused { turns_remaining, .. } => {
                if *turns_remaining == 0 {
                    self.recover();
                    return Decision { action: ActionKind::Wait, recovered: true };
                }
                let (dx, dy) = DIRECTIONS[rng.below(DIRECTIONS.len())];
                *turns_remaining -= 1;
                let recovered = *turns_remaining == 0;
                if recovered {
                    self.recover();
                }
                Decision { action: ActionKind::Bump { dx, dy }, recovered }
            }
        }
    }

    fn recover(&mut self) {
        match mem::replace(self, Ai::Player) {
            Ai::Confused { previous, .. } => *self = *previous,
            other => *self = other,
        }
    }
}

fn pursue(path: &mut Vec<Pos>, view: &AiView<'_>) -> ActionKind {
    let dx = view.player_pos.x - view.pos.x;
    let dy = view.player_pos.y - view.pos.y;

    if view.map.is_visible(view.pos) {
        if view.pos.chebyshev(view.player_pos) <= 1 {
            return ActionKind::MeleeAttack { dx, dy };
        }
        *path = find_path(&view.map.cost_grid(), view.pos, view.player_pos);
    }

    // A failed step or a confused stumble leaves the cache out of step with
    // the actor; route again toward where the path was heading.
    if let (Some(next), Some(goal)) = (path.first().copied(), path.last().copied())
        && view.pos.chebyshev(next) != 1
    {
        *path = find_path(&view.map.cost_grid(), view.pos, goal);
    }

    match path.first().copied() {
        Some(next) if view.pos.chebyshev(next) == 1 => {
            path.remove(0);
            ActionKind::Move { dx: next.x - view.pos.x, dy: next.y - view.pos.y }
        }
        _ => {
            path.clear();
            ActionKind::Wait
        }
    }
}
