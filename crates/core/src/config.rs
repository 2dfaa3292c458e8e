//! Session tuning knobs. Every field has a default so partial TOML files load.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const MIN_MAP_SIDE: usize = 8;
const MIN_ROOM_SIDE: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub room_min_size: usize,
    pub room_max_size: usize,
    pub max_rooms: usize,
    pub max_monsters_per_room: usize,
    pub max_items_per_room: usize,
    pub fov_radius: i32,
    /// Scheduler time an actor spends on one action.
    pub action_cost: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 43,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 30,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
            fov_radius: 8,
            action_cost: 100,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width < MIN_MAP_SIDE || self.map_height < MIN_MAP_SIDE {
            return Err(ConfigError::MapTooSmall {
                width: self.map_width,
                height: self.map_height,
                min: MIN_MAP_SIDE,
            });
        }
        if self.room_min_size < MIN_ROOM_SIDE || self.room_min_size > self.room_max_size {
            return Err(ConfigError::RoomSizeRange {
                min: self.room_min_size,
                max: self.room_max_size,
            });
        }
        // Rooms keep a one-cell wall margin on every side.
        if self.room_max_size + 2 > self.map_width || self.room_max_size + 2 > self.map_height {
            return Err(ConfigError::RoomTooLarge {
                room: self.room_max_size,
                width: self.map_width,
                height: self.map_height,
            });
        }
        if self.max_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.action_cost == 0 {
            return Err(ConfigError::ZeroActionCost);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_rooms_larger_than_the_map() {
        let config = SessionConfig { map_width: 12, room_max_size: 14, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::RoomTooLarge { room: 14, .. })));
    }

    #[test]
    fn rejects_inverted_room_size_range() {
        let config = SessionConfig { room_min_size: 9, room_max_size: 7, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::RoomSizeRange { min: 9, max: 7 }));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "map_width": 40, "fov_radius": 5 }"#).expect("config");
        assert_eq!(config.map_width, 40);
        assert_eq!(config.fov_radius, 5);
        assert_eq!(config.map_height, SessionConfig::default().map_height);
    }
}
