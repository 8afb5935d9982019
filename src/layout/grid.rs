//! Row-major grid placement.
//!
//! Nodes keep their input order: node `i` lands in row `i / c`, column
//! `i % c`, with `c = ceil(sqrt(n))` columns so the grid stays roughly
//! square. The same column rule is reused to arrange components.

use crate::geometry::Position;

/// Column count for `count` cells: `ceil(sqrt(count))`.
///
/// Computed on integers so perfect squares never round up.
pub fn columns(count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let mut cols = (count as f64).sqrt() as usize;
    while cols * cols < count {
        cols += 1;
    }
    while cols > 1 && (cols - 1) * (cols - 1) >= count {
        cols -= 1;
    }
    cols
}

/// `(row, column)` of the cell at `index`.
#[inline]
pub fn cell(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// Place `count` nodes on a grid with the given pitch, top-left cell at
/// the origin.
pub fn place(count: usize, spacing: f64) -> Vec<Position> {
    let cols = columns(count);
    (0..count)
        .map(|index| {
            let (row, col) = cell(index, cols);
            Position::new(col as f64 * spacing, row as f64 * spacing)
        })
        .collect()
}
