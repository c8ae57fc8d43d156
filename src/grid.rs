use rand::Rng;

/// Side of one grid cell, in board units.
pub const CELL_SIZE: i32 = 20;
/// Width and height of the square board, in board units.
pub const BOARD_EXTENT: i32 = 400;
/// Number of cells along one side of the board.
pub const CELLS_PER_SIDE: i32 = BOARD_EXTENT / CELL_SIZE;

/// A grid-aligned position. Coordinates are multiples of `CELL_SIZE`; a cell
/// one step past an edge is still representable so walls can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Cell { x: self.x + dx * CELL_SIZE, y: self.y + dy * CELL_SIZE }
    }

    pub fn in_bounds(self) -> bool {
        (0..BOARD_EXTENT).contains(&self.x) && (0..BOARD_EXTENT).contains(&self.y)
    }

    /// Column and row of this cell, for surfaces that draw in whole cells.
    pub fn column_row(self) -> (i32, i32) {
        (self.x / CELL_SIZE, self.y / CELL_SIZE)
    }

    /// Uniformly random cell anywhere on the board.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Cell {
            x: rng.gen_range(0..CELLS_PER_SIDE) * CELL_SIZE,
            y: rng.gen_range(0..CELLS_PER_SIDE) * CELL_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn offset_moves_by_whole_cells() {
        let c = Cell::new(160, 200);
        assert_eq!(c.offset((1, 0)), Cell::new(180, 200));
        assert_eq!(c.offset((0, -1)), Cell::new(160, 180));
        assert_eq!(Cell::new(0, 0).offset((-1, 0)), Cell::new(-20, 0));
    }

    #[test]
    fn bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(380, 380).in_bounds());
        assert!(!Cell::new(-20, 0).in_bounds());
        assert!(!Cell::new(0, 400).in_bounds());
        assert!(!Cell::new(400, 20).in_bounds());
    }

    #[test]
    fn random_cells_are_aligned_and_on_the_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let c = Cell::random(&mut rng);
            assert!(c.in_bounds());
            assert_eq!(c.x % CELL_SIZE, 0);
            assert_eq!(c.y % CELL_SIZE, 0);
        }
    }

    #[test]
    fn column_row_divides_by_cell_size() {
        assert_eq!(Cell::new(160, 200).column_row(), (8, 10));
    }
}
