use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grid::{Cell, Grid};

// Random samples tried before falling back to picking among the free cells.
const MAX_SAMPLES: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    /// Places food on a random cell outside `forbidden`, or returns `None`
    /// when there's no such cell.
    pub fn spawn<'a, R, I>(grid: Grid, forbidden: I, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut food = Food::at(Cell::new(0, 0));
        food.relocate(grid, forbidden, rng).map(|_| food)
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a uniformly random cell outside `forbidden` and
    /// returns it. When every cell is forbidden the position is left as it
    /// was and `None` comes back.
    pub fn relocate<'a, R, I>(&mut self, grid: Grid, forbidden: I, rng: &mut R) -> Option<Cell>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell>,
    {
        let forbidden: HashSet<Cell> = forbidden.into_iter().copied().filter(|c| grid.contains(*c)).collect();
        if forbidden.len() >= grid.area() {
            return None;
        }

        let sampled = (0..MAX_SAMPLES)
            .map(|_| Cell::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height())))
            .find(|cell| !forbidden.contains(cell));

        // A crowded board can reject every sample, so pick straight from
        // what's left. Both paths are uniform over the free cells.
        let position = match sampled {
            Some(cell) => cell,
            None => grid.cells().filter(|c| !forbidden.contains(c)).choose(rng)?,
        };

        self.position = position;
        Some(position)
    }
}
