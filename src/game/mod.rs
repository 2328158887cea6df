//! Core simulation logic for snake on a wrap-around grid
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies. The engine is driven externally: one `step` per clock tick,
//! with direction input buffered between ticks.

pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod food;
pub mod heading;
pub mod snake;

// Re-export commonly used types
pub use board::{BoardState, Cell, CellPatch, CellTag, Coord};
pub use clock::GameClock;
pub use config::GameConfig;
pub use engine::{Phase, SimulationEngine};
pub use error::GameError;
pub use events::GameEvent;
pub use heading::Heading;
pub use snake::Snake;
