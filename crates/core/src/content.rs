//! Entity templates. Generation spawns clones of these at fresh positions.

use crate::ai::Ai;
use crate::color;
use crate::consumable::Consumable;
use crate::entity::{Entity, Fighter, Inventory};
use crate::types::Rgb;

pub const PLAYER_INVENTORY_CAPACITY: usize = 26;

pub fn player() -> Entity {
    Entity::actor(
        '@',
        color::WHITE,
        "Player",
        Fighter::new(30, 2, 5),
        Inventory::new(PLAYER_INVENTORY_CAPACITY),
        Ai::Player,
    )
}

pub fn orc() -> Entity {
    Entity::actor('o', Rgb(63, 127, 63), "Orc", Fighter::new(10, 0, 3), Inventory::new(0), Ai::hostile())
}

pub fn troll() -> Entity {
    Entity::actor(
        'T',
        Rgb(0, 127, 0),
        "Troll",
        Fighter::new(16, 1, 4),
        Inventory::new(0),
        Ai::hostile(),
    )
}

pub fn health_potion() -> Entity {
    Entity::item('!', Rgb(127, 0, 255), "Health Potion", Consumable::Healing { amount: 4 })
}

pub fn lightning_scroll() -> Entity {
    Entity::item(
        '~',
        Rgb(255, 255, 0),
        "Lightning Scroll",
        Consumable::LightningDamage { damage: 20, maximum_range: 5 },
    )
}

pub fn confusion_scroll() -> Entity {
    Entity::item(
        '~',
        Rgb(207, 63, 255),
        "Confusion Scroll",
        Consumable::Confusion { number_of_turns: 10 },
    )
}

pub fn fireball_scroll() -> Entity {
    Entity::item(
        '~',
        Rgb(255, 0, 0),
        "Fireball Scroll",
        Consumable::Fireball { damage: 12, radius: 3 },
    )
}
