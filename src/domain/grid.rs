use super::Cell;
use crate::error::{LifeError, Result};

/// Grid manages the 2D cellular automaton state on a torus.
///
/// Coordinates are `(row, col)`. Reads through [`Grid::get`] wrap around both
/// axes; writes through [`Grid::seed`] never do.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with all cells dead
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Rebuild a grid from a row-major cell buffer produced by a stepper
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    /// `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Mark every given coordinate alive.
    ///
    /// # Panics
    ///
    /// If any coordinate lies outside the grid. Patterns are validated against
    /// the grid size before seeding, so this only fires on a catalog bug.
    pub fn seed<'a>(&mut self, coordinates: impl IntoIterator<Item = &'a (usize, usize)>) {
        for &(row, col) in coordinates {
            assert!(
                row < self.height && col < self.width,
                "seed coordinate ({row}, {col}) outside {}x{} grid",
                self.width,
                self.height
            );
            let idx = self.index(row, col);
            self.cells[idx] = Cell::Alive;
        }
    }

    /// Cell at `(row, col)`, wrapping both indices onto the torus
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Cell {
        let r = row.rem_euclid(self.height as isize) as usize;
        let c = col.rem_euclid(self.width as isize) as usize;
        self.cells[self.index(r, c)]
    }

    /// Cell at an in-range `(row, col)` without wrapping
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of all live cells in row-major order
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i / self.width, i % self.width, cell))
    }

    /// Immutable copy of the current state for a renderer
    pub fn snapshot(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            cells: self.cells.clone().into_boxed_slice(),
        }
    }
}

/// Read-only copy of a grid at one generation.
///
/// Owns its cells, so it is unaffected by later steps of the grid it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Box<[Cell]>,
}

impl Frame {
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// `false` for coordinates outside the frame
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col].is_alive()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Row-major rows of cells
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(7, 5).unwrap();
        assert_eq!(grid.dimensions(), (7, 5));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 10),
            Err(LifeError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Grid::new(10, 0).is_err());
    }

    #[test]
    fn test_seed_corners_succeeds() {
        let mut grid = Grid::new(100, 100).unwrap();
        grid.seed(&[(0, 0), (99, 99)]);
        assert_eq!(grid.live_cells(), vec![(0, 0), (99, 99)]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_seed_row_past_height_panics() {
        let mut grid = Grid::new(100, 100).unwrap();
        grid.seed(&[(100, 0)]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_seed_column_past_width_panics() {
        let mut grid = Grid::new(10, 20).unwrap();
        grid.seed(&[(0, 10)]);
    }

    #[test]
    fn test_get_wraps_toroidally() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.seed(&[(0, 0)]);
        assert_eq!(grid.get(0, 0), Cell::Alive);
        assert_eq!(grid.get(3, 4), Cell::Alive);
        assert_eq!(grid.get(-3, -4), Cell::Alive);
        assert_eq!(grid.get(-1, -1), Cell::Dead);
        assert_eq!(grid.get(300, 400), Cell::Alive);
    }

    #[test]
    fn test_non_square_indexing() {
        let mut grid = Grid::new(5, 2).unwrap();
        grid.seed(&[(1, 4)]);
        assert_eq!(grid.get(1, 4), Cell::Alive);
        assert_eq!(grid.get(-1, -1), Cell::Alive);
        assert_eq!(grid.live_cells(), vec![(1, 4)]);
    }

    #[test]
    fn test_snapshot_does_not_alias() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.seed(&[(1, 1)]);
        let frame = grid.snapshot();
        grid.seed(&[(0, 0)]);
        assert!(frame.is_alive(1, 1));
        assert!(!frame.is_alive(0, 0));
        assert_eq!(frame.population(), 1);
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_frame_rows() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.seed(&[(1, 2)]);
        let frame = grid.snapshot();
        let rows: Vec<_> = frame.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Cell::Dead, Cell::Dead, Cell::Alive]);
        assert!(!frame.is_alive(5, 5));
    }
}
