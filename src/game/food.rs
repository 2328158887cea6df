use rand::Rng;

use super::board::{BoardState, CellPatch, Coord};
use super::error::GameError;
use super::snake::Snake;

/// Random probes before falling back to scanning the free-cell set.
///
/// The snake normally covers a small fraction of the grid, so a probe
/// almost always lands on a free cell within a few tries; the scan keeps
/// the worst case bounded instead of recursing forever.
const MAX_PROBES: usize = 32;

/// Pick a free cell uniformly at random and mark it as food
///
/// Returns the chosen coordinate, or [`GameError::BoardFull`] when the
/// snake occupies every cell.
pub fn spawn<R: Rng>(
    rng: &mut R,
    board: &mut BoardState,
    snake: &Snake,
) -> Result<Coord, GameError> {
    let width = board.width();
    let height = board.height();

    for _ in 0..MAX_PROBES {
        let coord = Coord::new(
            rng.gen_range(0..width) as i32,
            rng.gen_range(0..height) as i32,
        );
        if !snake.contains(coord) {
            board.set(coord, CellPatch::food());
            return Ok(coord);
        }
    }

    // Probing kept hitting the snake: the board is crowded, so pick
    // uniformly from the free cells directly.
    let free: Vec<Coord> = board
        .snapshot()
        .map(|(coord, _)| coord)
        .filter(|&coord| !snake.contains(coord))
        .collect();

    if free.is_empty() {
        return Err(GameError::BoardFull);
    }

    let coord = free[rng.gen_range(0..free.len())];
    board.set(coord, CellPatch::food());
    Ok(coord)
}
