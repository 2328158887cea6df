use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Configuration for the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Tick interval at speed 1.0, in milliseconds
    pub base_tick_ms: u64,
    /// How much the speed factor grows per food eaten
    pub speed_increment: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            base_tick_ms: 300,
            speed_increment: 0.1,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Reject degenerate grids before any board is built
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width < 1 || self.grid_height < 1 {
            return Err(GameError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        Ok(())
    }
}
