//! Weighted shortest-path search over a cost grid.
//! This module exists so routing is reusable by any actor that holds a cost grid.
//! It does not own blocker weighting, which the map bakes into the grid.
//!
//! A cell cost of 0 is impassable; any other value multiplies the step cost
//! (2 for a cardinal step, 3 for a diagonal one) of entering that cell.
//! Ties are broken on `(f, h, y, x)` so identical inputs always yield the
//! identical path.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::Grid;
use crate::types::{DIRECTIONS, Pos};

pub type CostGrid = Grid<u16>;

const CARDINAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Cells from `start` (exclusive) to `goal` (inclusive); empty when the goal
/// cannot be reached.
pub fn find_path(cost: &CostGrid, start: Pos, goal: Pos) -> Vec<Pos> {
    if start == goal || !cost.in_bounds(start) || cost.at(goal) == 0 {
        return Vec::new();
    }

    let mut open_set = BTreeSet::new();
    let mut g_score: BTreeMap<Pos, u32> = BTreeMap::new();
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let h = octile(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0);

    while let Some(current) = open_set.pop_first() {
        let p = Pos { y: current.y, x: current.x };
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(&current_g) = g_score.get(&p) else {
            continue;
        };
        if current.f > current_g + current.h {
            // Superseded by a cheaper route found after this entry was queued.
            continue;
        }
        for (dx, dy) in DIRECTIONS {
            let next = p.offset(dx, dy);
            let cell_cost = u32::from(cost.at(next));
            if cell_cost == 0 {
                continue;
            }
            let step = if dx != 0 && dy != 0 { DIAGONAL_COST } else { CARDINAL_COST };
            let tentative_g = current_g.saturating_add(step * cell_cost);
            if tentative_g >= *g_score.get(&next).unwrap_or(&u32::MAX) {
                continue;
            }
            came_from.insert(next, p);
            g_score.insert(next, tentative_g);
            let h = octile(next, goal);
            open_set.insert(OpenNode { f: tentative_g + h, h, y: next.y, x: next.x });
        }
    }
    Vec::new()
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(prev) = came_from.get(&current).copied() else {
            return Vec::new();
        };
        current = prev;
        path.push(current);
    }
    path.reverse();
    path.remove(0);
    path
}

fn octile(a: Pos, b: Pos) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let diagonal = dx.min(dy);
    let straight = dx.max(dy) - diagonal;
    diagonal * DIAGONAL_COST + straight * CARDINAL_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_costs(width: usize, height: usize) -> CostGrid {
        let mut grid = Grid::new(width, height, 1);
        for x in 0..width as i32 {
            grid.set(Pos { y: 0, x }, 0);
            grid.set(Pos { y: height as i32 - 1, x }, 0);
        }
        for y in 0..height as i32 {
            grid.set(Pos { y, x: 0 }, 0);
            grid.set(Pos { y, x: width as i32 - 1 }, 0);
        }
        grid
    }

    #[test]
    fn straight_corridor_path_excludes_start_and_ends_at_goal() {
        let grid = open_costs(8, 5);
        let path = find_path(&grid, Pos { y: 2, x: 1 }, Pos { y: 2, x: 5 });
        assert_eq!(
            path,
            vec![Pos { y: 2, x: 2 }, Pos { y: 2, x: 3 }, Pos { y: 2, x: 4 }, Pos { y: 2, x: 5 }]
        );
    }

    #[test]
    fn diagonal_steps_are_used_for_diagonal_goals() {
        let grid = open_costs(8, 8);
        let path = find_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 4, x: 4 });
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&Pos { y: 4, x: 4 }));
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        let mut grid = open_costs(9, 5);
        for y in 0..5 {
            grid.set(Pos { y, x: 4 }, 0);
        }
        assert!(find_path(&grid, Pos { y: 2, x: 2 }, Pos { y: 2, x: 6 }).is_empty());
    }

    #[test]
    fn wall_goal_yields_empty_path() {
        let grid = open_costs(6, 6);
        assert!(find_path(&grid, Pos { y: 2, x: 2 }, Pos { y: 0, x: 0 }).is_empty());
    }

    #[test]
    fn expensive_cells_are_avoided_when_a_cheap_detour_exists() {
        let mut grid = open_costs(7, 5);
        grid.set(Pos { y: 2, x: 3 }, 11);
        let path = find_path(&grid, Pos { y: 2, x: 1 }, Pos { y: 2, x: 5 });
        assert!(!path.contains(&Pos { y: 2, x: 3 }), "path {path:?} crosses the crowded cell");
        assert_eq!(path.last(), Some(&Pos { y: 2, x: 5 }));
    }

    #[test]
    fn expensive_cells_remain_passable() {
        let mut grid = open_costs(7, 3);
        grid.set(Pos { y: 1, x: 3 }, 11);
        let path = find_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 5 });
        assert!(path.contains(&Pos { y: 1, x: 3 }));
    }
}
