use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};
use Direction::*;
use MoveResult::*;

/// Length of a freshly spawned snake.
pub const INITIAL_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// Unit step for this direction; rows grow downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_head: Cell, old_tail: Option<Cell> },
    Crashed
}

impl MoveResult {
    pub fn is_moved(&self) -> bool {
        matches!(self, Moved { .. })
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    grid: Grid,
    body: VecDeque<Cell>,
    heading: Direction,
    // Heading used by the last advance. Turns are checked against this one so
    // that two requests within a tick can't add up to a reversal.
    moved_heading: Direction,
    length_target: usize,
    score: u32,
}

impl Snake {
    /// A snake of `INITIAL_LENGTH` cells with its head at `head`, the body
    /// trailing behind it opposite to `heading`.
    pub fn new(grid: Grid, head: Cell, heading: Direction) -> Self {
        let back = heading.opposite().delta();
        let body = (0..INITIAL_LENGTH as i32)
            .map(|i| grid.wrap(head, (back.0 * i, back.1 * i)))
            .collect();

        Snake {
            grid,
            body,
            heading,
            moved_heading: heading,
            length_target: INITIAL_LENGTH,
            score: 0,
        }
    }

    /// Centered snake with a uniformly random heading.
    pub fn spawn<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        Snake::new(grid, grid.center(), Direction::random(rng))
    }

    /// Restores a snake from an explicit body, head first. The length target
    /// is the larger of the body length and `INITIAL_LENGTH`.
    pub fn from_cells(grid: Grid, cells: &[Cell], heading: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }

        Some(Snake {
            grid,
            body: cells.iter().copied().collect(),
            heading,
            moved_heading: heading,
            length_target: cells.len().max(INITIAL_LENGTH),
            score: 0,
        })
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Snake::spawn(self.grid, rng);
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: every constructor fills it and advance
        // only pops after pushing.
        self.body[0]
    }

    pub fn positions(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn length_target(&self) -> usize {
        self.length_target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_heading(&mut self, requested: Direction) {
        if !requested.is_opposite(self.moved_heading) {
            self.heading = requested;
        }
    }

    pub fn advance(&mut self) -> MoveResult {
        let old_head = self.head();
        let new_head = self.grid.step(old_head, self.heading);

        // The current head vacates its cell this tick, so only the rest of
        // the body counts.
        if self.body.iter().skip(1).any(|c| *c == new_head) {
            return Crashed;
        }

        self.body.push_front(new_head);
        self.moved_heading = self.heading;

        let old_tail = if self.body.len() > self.length_target {
            self.body.pop_back()
        } else {
            None
        };

        Moved { new_head, old_head, old_tail }
    }

    pub fn grow(&mut self, extra_length: usize, points: u32) {
        self.length_target = self.length_target.saturating_add(extra_length);
        self.score = self.score.saturating_add(points);
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
