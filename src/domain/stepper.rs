//! One-generation update of a toroidal grid.
//!
//! Every next state is computed from the frozen pre-step grid and written to a
//! fresh buffer, so updates are synchronous: no cell sees another cell's
//! next state within the same step.

use rayon::prelude::*;

use super::{Cell, Grid, RuleTable};

/// Moore neighborhood offsets as `(d_row, d_col)`
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Count live Moore neighbors of `(row, col)` with toroidal wrapping
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (r, c) = (row as isize, col as isize);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| grid.get(r + dr, c + dc).is_alive())
        .count() as u8
}

#[inline]
fn next_cell(grid: &Grid, rules: &RuleTable, row: usize, col: usize) -> Cell {
    rules.next_state(grid.at(row, col), count_live_neighbors(grid, row, col))
}

/// Compute the next generation serially
pub fn step(grid: &Grid, rules: &RuleTable) -> Grid {
    let (width, height) = grid.dimensions();
    let cells = (0..height)
        .flat_map(|row| (0..width).map(move |col| (row, col)))
        .map(|(row, col)| next_cell(grid, rules, row, col))
        .collect();

    Grid::from_cells(width, height, cells)
}

/// Compute the next generation with rows split across the rayon pool.
/// Produces exactly the same grid as [`step`].
pub fn step_parallel(grid: &Grid, rules: &RuleTable) -> Grid {
    let (width, height) = grid.dimensions();
    let mut cells = vec![Cell::Dead; width * height];

    // Each worker owns one output row; all reads go to `grid`
    cells
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = next_cell(grid, rules, row, col);
            }
        });

    Grid::from_cells(width, height, cells)
}
