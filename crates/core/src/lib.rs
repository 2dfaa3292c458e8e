pub mod action;
pub mod ai;
pub mod color;
pub mod config;
pub mod consumable;
pub mod content;
pub mod engine;
pub mod entity;
pub mod error;
pub mod grid;
pub mod map;
pub mod mapgen;
pub mod message_log;
pub mod pathfinding;
pub mod rng;
pub mod save;
pub mod scheduler;
pub mod tile;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod test_support;

pub use action::{Action, ActionKind};
pub use ai::Ai;
pub use config::SessionConfig;
pub use consumable::Consumable;
pub use engine::{Engine, Intent};
pub use entity::{Actor, Entity, EntityKind, Fighter, Inventory, Item};
pub use error::{ConfigError, EngineError, Impossible, MapError, SchedulerError};
pub use grid::Grid;
pub use map::GameMap;
pub use message_log::{Message, MessageLog};
pub use rng::GameRng;
pub use save::SaveError;
pub use scheduler::{Ticket, TurnQueue};
pub use tile::TileKind;
pub use types::*;
