//! Error types shared across the simulation core.
//!
//! `Impossible` is the only recoverable failure: an action that cannot be
//! attempted right now. Everything else is unexpected and bubbles up as
//! `EngineError`.

use thiserror::Error;

use crate::types::Pos;

/// An action that could not be attempted. No state was changed and no turn
/// was spent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Impossible(pub String);

impl Impossible {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("turn queue is empty")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("position {0:?} is outside the map")]
    OutOfBounds(Pos),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("map must be at least {min}x{min}, got {width}x{height}")]
    MapTooSmall { width: usize, height: usize, min: usize },
    #[error("room size range {min}..={max} is invalid")]
    RoomSizeRange { min: usize, max: usize },
    #[error("rooms of size {room} do not fit a {width}x{height} map")]
    RoomTooLarge { room: usize, width: usize, height: usize },
    #[error("at least one room is required")]
    NoRooms,
    #[error("action cost must be positive")]
    ZeroActionCost,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("invalid session configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("player entity is missing from the current map")]
    MissingPlayer,
}
