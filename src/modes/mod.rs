pub mod human;

pub use human::{grid_dims, HumanMode};
