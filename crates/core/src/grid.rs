//! Row-major 2D storage shared by the map bitmaps and collaborator inputs.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self { width, height, cells: vec![fill; width * height] }
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    /// Writes `value` at `pos`; out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Pos, value: T) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = value;
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (Pos { y: (idx / width) as i32, x: (idx % width) as i32 }, cell)
        })
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

impl<T: Copy + Default> Grid<T> {
    /// Value at `pos`, or `T::default()` outside the grid.
    pub fn at(&self, pos: Pos) -> T {
        self.get(pos).copied().unwrap_or_default()
    }
}
