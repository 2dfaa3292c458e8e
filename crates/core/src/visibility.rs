//! Field-of-view over a transparency grid using recursive shadowcasting.
//! This module exists to keep sight rules deterministic and independent of the map type.
//! It does not own explored-state bookkeeping.
//!
//! Opaque cells that bound the view are themselves visible, so walls light up.

use crate::grid::Grid;
use crate::types::Pos;

pub fn compute_visible(transparent: &Grid<bool>, origin: Pos, radius: i32) -> Grid<bool> {
    let mut visible = Grid::new(transparent.width(), transparent.height(), false);
    if !transparent.in_bounds(origin) {
        return visible;
    }
    visible.set(origin, true);
    let mut scan = OctantScan { transparent, visible: &mut visible, origin, radius };
    for octant in 0..8 {
        scan.scan(1, Slope::new(1, 1), Slope::new(0, 1), octant);
    }
    visible
}

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

struct OctantScan<'a> {
    transparent: &'a Grid<bool>,
    visible: &'a mut Grid<bool>,
    origin: Pos,
    radius: i32,
}

impl OctantScan<'_> {
    fn scan(&mut self, dist: i32, start: Slope, end: Slope, oct: u8) {
        if dist > self.radius {
            return;
        }
        let radius_sq = self.radius * self.radius;
        let mut blocked = false;
        let mut cur_start = start;
        for y in (0..=dist).rev() {
            let top = Slope::new(2 * y + 1, 2 * dist - 1);
            let bot = Slope::new(2 * y - 1, 2 * dist + 1);
            if !(cur_start.greater_or_equal(&bot) && top.greater_than(&end)) {
                continue;
            }
            let p = transform_octant(self.origin, dist, y, oct);
            if dist * dist + y * y <= radius_sq {
                self.visible.set(p, true);
            }
            // Cells past the map edge count as opaque.
            if !self.transparent.at(p) {
                if !blocked {
                    self.scan(dist + 1, cur_start, top, oct);
                    blocked = true;
                }
                cur_start = bot;
            } else if blocked {
                blocked = false;
            }
        }
        if !blocked {
            self.scan(dist + 1, cur_start, end, oct);
        }
    }
}
