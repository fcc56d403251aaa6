use serde::{Deserialize, Serialize};

use crate::snake::Direction;

/// A single square of the board, addressed by column and row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Cell { x, y }
    }
}

impl From<(u16, u16)> for Cell {
    fn from((x, y): (u16, u16)) -> Self {
        Cell { x, y }
    }
}

/// Fixed size board whose edges wrap around onto each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Offsets `cell` by `delta`, re-entering from the opposite edge when it
    /// leaves the board. Works for deltas of any sign or magnitude.
    pub fn wrap(&self, cell: Cell, delta: (i32, i32)) -> Cell {
        let x = (cell.x as i64 + delta.0 as i64).rem_euclid(self.width as i64);
        let y = (cell.y as i64 + delta.1 as i64).rem_euclid(self.height as i64);
        Cell::new(x as u16, y as u16)
    }

    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        self.wrap(cell, direction.delta())
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}
