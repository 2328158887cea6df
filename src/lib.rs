//! Torus Snake - classic snake on a wrap-around grid
//!
//! This library provides:
//! - Core simulation logic with no I/O dependencies (game module)
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Session stats and high-score persistence (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
