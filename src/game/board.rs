/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy), wrapping each axis modulo the grid dimensions
    ///
    /// Exiting one edge re-enters the opposite edge; there are no walls.
    pub fn stepped(&self, dx: i32, dy: i32, width: usize, height: usize) -> Self {
        Self {
            x: (self.x + dx).rem_euclid(width as i32),
            y: (self.y + dy).rem_euclid(height as i32),
        }
    }
}

/// Render tag for a cell; the renderer maps it to a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellTag {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Attributes of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub snake: bool,
    pub food: bool,
    pub tag: CellTag,
}

/// Partial cell update; only the populated fields are applied
#[derive(Debug, Clone, Copy, Default)]
pub struct CellPatch {
    pub snake: Option<bool>,
    pub food: Option<bool>,
    pub tag: Option<CellTag>,
}

impl CellPatch {
    /// Claim a cell for the snake body
    pub fn snake() -> Self {
        Self {
            snake: Some(true),
            tag: Some(CellTag::Snake),
            ..Default::default()
        }
    }

    /// Release a cell the snake has vacated
    pub fn vacated() -> Self {
        Self {
            snake: Some(false),
            tag: Some(CellTag::Empty),
            ..Default::default()
        }
    }

    /// Place food on a cell
    pub fn food() -> Self {
        Self {
            food: Some(true),
            tag: Some(CellTag::Food),
            ..Default::default()
        }
    }

    /// Remove the food flag, leaving occupancy untouched
    pub fn food_eaten() -> Self {
        Self {
            food: Some(false),
            ..Default::default()
        }
    }
}

/// The authoritative world model: one attribute entry per grid cell
///
/// Entries are stored in a flat vector indexed `y * width + x`; they are
/// created once at initialization and only ever mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl BoardState {
    /// Allocate a cleared board with the origin cell claimed by the snake
    ///
    /// Dimensions must already be validated (see `GameConfig::validate`).
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1);

        let mut board = Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        };
        board.set(Coord::new(0, 0), CellPatch::snake());
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read the attributes at `coord`; panics on out-of-range coordinates
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    /// Merge `patch` into the entry at `coord`
    ///
    /// Never fails for in-range coordinates; out-of-range is a programming
    /// error and panics.
    pub fn set(&mut self, coord: Coord, patch: CellPatch) {
        let idx = self.index(coord);
        let cell = &mut self.cells[idx];
        if let Some(snake) = patch.snake {
            cell.snake = snake;
        }
        if let Some(food) = patch.food {
            cell.food = food;
        }
        if let Some(tag) = patch.tag {
            cell.tag = tag;
        }
    }

    /// Lazy row-major walk over all (coordinate, attributes) pairs
    ///
    /// Restartable: each call yields a fresh iterator in the same order.
    pub fn snapshot(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, cell)| {
            let coord = Coord::new((i % self.width) as i32, (i / self.width) as i32);
            (coord, cell)
        })
    }

    fn index(&self, coord: Coord) -> usize {
        assert!(
            coord.x >= 0
                && (coord.x as usize) < self.width
                && coord.y >= 0
                && (coord.y as usize) < self.height,
            "coordinate ({}, {}) outside {}x{} board",
            coord.x,
            coord.y,
            self.width,
            self.height,
        );
        coord.y as usize * self.width + coord.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_step() {
        let c = Coord::new(9, 0);
        assert_eq!(c.stepped(1, 0, 10, 10), Coord::new(0, 0));
        assert_eq!(Coord::new(0, 0).stepped(-1, 0, 10, 10), Coord::new(9, 0));
        assert_eq!(Coord::new(0, 9).stepped(0, 1, 10, 10), Coord::new(0, 0));
        assert_eq!(Coord::new(0, 0).stepped(0, -1, 10, 10), Coord::new(0, 9));
        assert_eq!(Coord::new(4, 4).stepped(1, 0, 10, 10), Coord::new(5, 4));
    }

    #[test]
    fn test_initial_board() {
        let board = BoardState::new(4, 3);
        assert_eq!(board.snapshot().count(), 12);

        let origin = board.cell(Coord::new(0, 0));
        assert!(origin.snake);
        assert!(!origin.food);
        assert_eq!(origin.tag, CellTag::Snake);

        for (coord, cell) in board.snapshot() {
            if coord != Coord::new(0, 0) {
                assert_eq!(*cell, Cell::default());
            }
        }
    }

    #[test]
    fn test_patch_merges_fields() {
        let mut board = BoardState::new(3, 3);
        let c = Coord::new(1, 1);

        board.set(c, CellPatch::food());
        assert!(board.cell(c).food);
        assert!(!board.cell(c).snake);
        assert_eq!(board.cell(c).tag, CellTag::Food);

        // Clearing the food flag must not disturb the other fields
        board.set(c, CellPatch::food_eaten());
        assert!(!board.cell(c).food);
        assert_eq!(board.cell(c).tag, CellTag::Food);

        board.set(c, CellPatch::snake());
        assert!(board.cell(c).snake);
        assert!(!board.cell(c).food);
        assert_eq!(board.cell(c).tag, CellTag::Snake);
    }

    #[test]
    fn test_snapshot_is_row_major_and_restartable() {
        let board = BoardState::new(3, 2);
        let order: Vec<Coord> = board.snapshot().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(0, 1),
                Coord::new(1, 1),
                Coord::new(2, 1),
            ]
        );

        let again: Vec<Coord> = board.snapshot().map(|(c, _)| c).collect();
        assert_eq!(order, again);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_read_panics() {
        let board = BoardState::new(3, 3);
        board.cell(Coord::new(3, 0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_negative_coordinate_panics() {
        let mut board = BoardState::new(3, 3);
        board.set(Coord::new(0, -1), CellPatch::food());
    }
}
