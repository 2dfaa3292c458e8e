//! Static tile definitions. The map stores `TileKind`; properties and
//! graphics are looked up here.

use serde::{Deserialize, Serialize};

use crate::color;
use crate::types::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    DownStairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Graphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    /// Drawn when explored but not currently in view.
    pub dark: Graphic,
    /// Drawn while in view.
    pub light: Graphic,
}

/// Drawn for cells that were never seen.
pub const SHROUD: Graphic = Graphic { glyph: ' ', fg: color::WHITE, bg: color::BLACK };

const WALL: Tile = Tile {
    walkable: false,
    transparent: false,
    dark: Graphic { glyph: '#', fg: Rgb(100, 100, 100), bg: Rgb(0, 0, 100) },
    light: Graphic { glyph: '#', fg: Rgb(200, 180, 50), bg: Rgb(130, 110, 50) },
};

const FLOOR: Tile = Tile {
    walkable: true,
    transparent: true,
    dark: Graphic { glyph: '.', fg: Rgb(100, 100, 100), bg: Rgb(50, 50, 150) },
    light: Graphic { glyph: '.', fg: color::WHITE, bg: Rgb(200, 180, 50) },
};

const DOWN_STAIRS: Tile = Tile {
    walkable: true,
    transparent: true,
    dark: Graphic { glyph: '>', fg: Rgb(0, 0, 100), bg: Rgb(50, 50, 150) },
    light: Graphic { glyph: '>', fg: color::WHITE, bg: Rgb(200, 180, 50) },
};

impl TileKind {
    pub fn tile(self) -> &'static Tile {
        match self {
            TileKind::Wall => &WALL,
            TileKind::Floor => &FLOOR,
            TileKind::DownStairs => &DOWN_STAIRS,
        }
    }

    pub fn is_walkable(self) -> bool {
        self.tile().walkable
    }

    pub fn is_transparent(self) -> bool {
        self.tile().transparent
    }
}
