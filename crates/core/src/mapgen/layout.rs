//! Room rectangles and the corridors that join them.

use crate::grid::Grid;
use crate::rng::GameRng;
use crate::tile::TileKind;
use crate::types::Pos;

/// Outer bounds of a room, walls included. Only the interior is carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x1: usize,
    pub(super) y1: usize,
    pub(super) x2: usize,
    pub(super) y2: usize,
}

impl RoomRect {
    pub(super) fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: ((self.y1 + self.y2) / 2) as i32, x: ((self.x1 + self.x2) / 2) as i32 }
    }

    /// Edges touching counts as overlap, so rooms never share a wall.
    pub(super) fn intersects(self, other: &Self) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// A uniformly chosen interior cell.
    pub(super) fn random_interior(self, rng: &mut GameRng) -> Pos {
        let x = rng.range_inclusive(self.x1 + 1, self.x2 - 1);
        let y = rng.range_inclusive(self.y1 + 1, self.y2 - 1);
        Pos { y: y as i32, x: x as i32 }
    }

    pub(super) fn carve(self, tiles: &mut Grid<TileKind>) {
        for y in (self.y1 + 1)..self.y2 {
            for x in (self.x1 + 1)..self.x2 {
                tiles.set(Pos { y: y as i32, x: x as i32 }, TileKind::Floor);
            }
        }
    }
}

/// Carves an L-shaped corridor, bending horizontally or vertically first at random.
pub(super) fn carve_tunnel(tiles: &mut Grid<TileKind>, start: Pos, end: Pos, rng: &mut GameRng) {
    let corner =
        if rng.percent(50) { Pos { y: start.y, x: end.x } } else { Pos { y: end.y, x: start.x } };
    for pos in straight_line(start, corner).chain(straight_line(corner, end)) {
        tiles.set(pos, TileKind::Floor);
    }
}

fn straight_line(from: Pos, to: Pos) -> impl Iterator<Item = Pos> {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    let steps = from.chebyshev(to) as i32;
    (0..=steps).map(move |step| from.offset(dx * step, dy * step))
}
