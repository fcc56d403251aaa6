use thiserror::Error;

/// Reasons a session can't be built from the given configuration or state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16, min: u16 },

    #[error("grid can be at most {max}x{max} cells, got {width}x{height}")]
    GridTooLarge { width: u16, height: u16, max: u16 },

    #[error("tick rate must be positive")]
    ZeroTickRate,

    #[error("snake body can't be empty")]
    EmptySnake,

    #[error("cell ({x}, {y}) is outside the grid")]
    CellOutOfBounds { x: u16, y: u16 },
}
