use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::snake::{Direction, MoveResult, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// The head ran into the body.
    SelfCollision,
    /// The snake covers the whole board, so no food can be placed. A win.
    BoardFull,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Running,
    Ended(EndReason),
}

/// What a single call to [`Session::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// The session had already ended.
    Idle,
    Moved { new_head: Cell, old_head: Cell, old_tail: Option<Cell> },
    Ate { new_head: Cell, old_head: Cell, old_tail: Option<Cell>, food: Cell },
    Crashed,
    /// The snake ate the last food there was room for.
    BoardFull { new_head: Cell, old_head: Cell, old_tail: Option<Cell> },
}

/// Everything a frame needs to draw, detached from the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub width: u16,
    pub height: u16,
    pub positions: Vec<Cell>,
    pub heading: Direction,
    pub score: u32,
    pub food: Cell,
    pub state: SessionState,
}

/// One play-through: a snake, its food, and the random source used to place
/// both.
#[derive(Debug)]
pub struct Session<R = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    state: SessionState,
    ticks: u64,
    rng: R,
}

impl Session<ThreadRng> {
    pub fn with_thread_rng(config: GameConfig) -> Result<Self, ConfigError> {
        Session::new(config, rand::thread_rng())
    }
}

impl Session<StdRng> {
    /// Sessions built from the same seed replay identically given the same
    /// inputs.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Session::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        let (snake, food, state) = spawn_round(grid, &mut rng);

        Ok(Session { config, grid, snake, food, state, ticks: 0, rng })
    }

    /// Builds a running session from an explicit body (head first) and food
    /// cell. Food that lands on the body is moved elsewhere.
    pub fn from_parts(
        config: GameConfig,
        body: &[Cell],
        heading: Direction,
        food: Cell,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        if let Some(cell) = body.iter().chain(Some(&food)).find(|c| !grid.contains(**c)) {
            return Err(ConfigError::CellOutOfBounds { x: cell.x, y: cell.y });
        }

        let snake = Snake::from_cells(grid, body, heading).ok_or(ConfigError::EmptySnake)?;
        let mut food = Food::at(food);
        let mut state = SessionState::Running;

        if snake.occupies(food.position()) && food.relocate(grid, snake.positions(), &mut rng).is_none() {
            state = SessionState::Ended(EndReason::BoardFull);
        }

        Ok(Session { config, grid, snake, food, state, ticks: 0, rng })
    }

    /// Advances the simulation by one step.
    #[instrument(level = "trace", skip_all)]
    pub fn tick(&mut self) -> TickEvent {
        if self.is_ended() {
            return TickEvent::Idle;
        }

        let (new_head, old_head, old_tail) = match self.snake.advance() {
            MoveResult::Crashed => {
                debug!(score = self.snake.score(), len = self.snake.len(), "snake crashed into itself");
                self.state = SessionState::Ended(EndReason::SelfCollision);
                return TickEvent::Crashed;
            }
            MoveResult::Moved { new_head, old_head, old_tail } => (new_head, old_head, old_tail),
        };

        self.ticks += 1;

        if new_head != self.food.position() {
            return TickEvent::Moved { new_head, old_head, old_tail };
        }

        self.snake.grow(self.config.growth_per_food, self.config.score_per_food);
        debug!(
            score = self.snake.score(),
            length_target = self.snake.length_target(),
            "food eaten at ({}, {})",
            new_head.x,
            new_head.y
        );

        match self.food.relocate(self.grid, self.snake.positions(), &mut self.rng) {
            Some(food) => TickEvent::Ate { new_head, old_head, old_tail, food },
            None => {
                debug!(score = self.snake.score(), "no free cell left for food");
                self.state = SessionState::Ended(EndReason::BoardFull);
                TickEvent::BoardFull { new_head, old_head, old_tail }
            }
        }
    }

    pub fn request_direction(&mut self, direction: Direction) {
        if !self.is_ended() {
            self.snake.set_heading(direction);
        }
    }

    /// Starts a new round from any state, abandoning the current one.
    pub fn reset(&mut self) {
        let (snake, food, state) = spawn_round(self.grid, &mut self.rng);
        self.snake = snake;
        self.food = food;
        self.state = state;
        self.ticks = 0;
        debug!(heading = ?self.snake.heading(), "session reset");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, SessionState::Ended(_))
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Successful steps since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            positions: self.snake.positions().copied().collect(),
            heading: self.snake.heading(),
            score: self.snake.score(),
            food: self.food.position(),
            state: self.state,
        }
    }
}

fn spawn_round<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> (Snake, Food, SessionState) {
    let snake = Snake::spawn(grid, rng);
    match Food::spawn(grid, snake.positions(), rng) {
        Some(food) => (snake, food, SessionState::Running),
        None => {
            let food = Food::at(snake.head());
            (snake, food, SessionState::Ended(EndReason::BoardFull))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(u16, u16)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(GameConfig::default(), rng()).unwrap();

        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.snake().head(), Cell::new(20, 15));
        assert!(!session.snake().occupies(session.food().position()));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let res = Session::new(GameConfig::new(1, 1), rng());
        assert!(matches!(res, Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn test_from_parts_validates_cells() {
        let config = GameConfig::new(10, 10);

        let res = Session::from_parts(config.clone(), &[], Direction::Up, Cell::new(1, 1), rng());
        assert_eq!(res.err(), Some(ConfigError::EmptySnake));

        let res = Session::from_parts(config, &cells(&[(10, 2)]), Direction::Up, Cell::new(1, 1), rng());
        assert_eq!(res.err(), Some(ConfigError::CellOutOfBounds { x: 10, y: 2 }));
    }

    #[test]
    fn test_from_parts_moves_food_off_snake() {
        let body = cells(&[(5, 5), (4, 5), (3, 5)]);
        let session =
            Session::from_parts(GameConfig::new(10, 10), &body, Direction::Right, Cell::new(4, 5), rng()).unwrap();

        assert!(!body.contains(&session.food().position()));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_tick_reports_movement() {
        let body = cells(&[(5, 5), (4, 5), (3, 5)]);
        let mut session =
            Session::from_parts(GameConfig::new(10, 10), &body, Direction::Right, Cell::new(0, 0), rng()).unwrap();

        assert_eq!(
            session.tick(),
            TickEvent::Moved {
                new_head: Cell::new(6, 5),
                old_head: Cell::new(5, 5),
                old_tail: Some(Cell::new(3, 5)),
            }
        );
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn test_eating_uses_configured_rewards() {
        let config = GameConfig {
            growth_per_food: 3,
            score_per_food: 25,
            ..GameConfig::new(10, 10)
        };
        let body = cells(&[(5, 5), (4, 5), (3, 5)]);
        let mut session = Session::from_parts(config, &body, Direction::Right, Cell::new(6, 5), rng()).unwrap();

        let event = session.tick();

        assert!(matches!(event, TickEvent::Ate { new_head, .. } if new_head == Cell::new(6, 5)));
        assert_eq!(session.score(), 25);
        assert_eq!(session.snake().length_target(), 6);
        assert!(!session.snake().occupies(session.food().position()));
    }

    #[test]
    fn test_request_direction_ignored_after_end() {
        // Heading Down from (5,5) runs into (5,6).
        let body = cells(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        let mut session =
            Session::from_parts(GameConfig::new(10, 10), &body, Direction::Down, Cell::new(0, 0), rng()).unwrap();

        assert_eq!(session.tick(), TickEvent::Crashed);
        assert_eq!(session.state(), SessionState::Ended(EndReason::SelfCollision));

        session.request_direction(Direction::Left);
        assert_eq!(session.snake().heading(), Direction::Down);
        assert_eq!(session.tick(), TickEvent::Idle);
    }

    #[test]
    fn test_reset_from_running() {
        let mut session = Session::new(GameConfig::default(), rng()).unwrap();
        session.tick();
        session.tick();

        session.reset();

        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.snake().head(), session.grid().center());
    }

    #[test]
    fn test_snapshot_matches_session() {
        let session = Session::new(GameConfig::new(12, 8), rng()).unwrap();
        let snap = session.snapshot();

        assert_eq!((snap.width, snap.height), (12, 8));
        assert_eq!(snap.positions, session.snake().positions().copied().collect::<Vec<_>>());
        assert_eq!(snap.heading, session.snake().heading());
        assert_eq!(snap.food, session.food().position());
        assert_eq!(snap.state, SessionState::Running);
    }

    #[test]
    fn test_snapshot_to_json() {
        let body = cells(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        let mut session =
            Session::from_parts(GameConfig::new(10, 10), &body, Direction::Down, Cell::new(0, 0), rng()).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["width"], 10);
        assert_eq!(json["positions"][0], serde_json::json!({ "x": 5, "y": 5 }));
        assert_eq!(json["positions"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["heading"], "Down");
        assert_eq!(json["food"], serde_json::json!({ "x": 0, "y": 0 }));
        assert_eq!(json["state"], "Running");

        session.tick();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], serde_json::json!({ "Ended": "SelfCollision" }));
    }
}
