//! Simulation core for a single-player snake game on a wrapping grid.
//!
//! A [`Session`] owns the snake, its food and the random source used to
//! place both. Hosts call [`Session::request_direction`] for player input,
//! [`Session::tick`] at a fixed rate and read the result back through the
//! accessors or a [`Snapshot`]. Nothing here touches a terminal or a clock.

pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use config::{GameConfig, MAX_DIMENSION};
pub use error::ConfigError;
pub use food::Food;
pub use grid::{Cell, Grid};
pub use session::{EndReason, Session, SessionState, Snapshot, TickEvent};
pub use snake::{Direction, MoveResult, Snake, INITIAL_LENGTH};
