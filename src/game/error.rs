use thiserror::Error;

/// Errors the simulation core can report
///
/// Self-collision is not an error; it is a normal terminal game state and is
/// reported through [`GameEvent::GameOver`](super::GameEvent::GameOver).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Grid dimensions too small to play on (viewport too small)
    #[error("invalid grid size {width}x{height}: both dimensions must be at least 1")]
    InvalidGrid { width: usize, height: usize },

    /// No free cell left to place food on
    #[error("cannot spawn food: every cell is occupied by the snake")]
    BoardFull,
}
