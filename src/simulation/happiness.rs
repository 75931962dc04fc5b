//! Neighborhood happiness evaluation
//!
//! A resident's happiness is the fraction of same-color cells among all
//! cells within Chebyshev radius `radius` of its position, excluding the
//! resident's own cell. The neighborhood is clipped at the grid edge; there
//! is no wraparound.

use crate::core::types::{Cell, Position};
use crate::grid::Grid;

/// Hypothetical happiness of `color` at `pos`.
///
/// Returns `None` when the neighborhood contains no cells, which only
/// happens on a 1x1 grid.
pub fn happiness(grid: &Grid, pos: Position, color: Cell, radius: usize) -> Option<f64> {
    let size = grid.size();
    let row_start = pos.row.saturating_sub(radius);
    let row_end = (pos.row + radius).min(size - 1);
    let col_start = pos.col.saturating_sub(radius);
    let col_end = (pos.col + radius).min(size - 1);

    let mut matching = 0usize;
    let mut total = 0usize;
    for row in row_start..=row_end {
        for col in col_start..=col_end {
            if row == pos.row && col == pos.col {
                continue;
            }
            total += 1;
            if grid.get(Position::new(row, col)) == Some(color) {
                matching += 1;
            }
        }
    }

    if total == 0 {
        None
    } else {
        Some(matching as f64 / total as f64)
    }
}

/// Whether the resident at `pos` meets the happiness threshold.
///
/// Vacant or out-of-bounds positions are never happy; neither is an
/// occupant whose neighborhood holds no cells at all.
pub fn is_happy(grid: &Grid, pos: Position, radius: usize, threshold: f64) -> bool {
    match grid.get(pos) {
        Some(color) if color.is_occupied() => match happiness(grid, pos, color, radius) {
            Some(fraction) => fraction >= threshold,
            None => false,
        },
        _ => false,
    }
}

/// Fraction of residents that are happy; 1.0 for a grid with no residents.
pub fn fraction_happy(grid: &Grid, radius: usize, threshold: f64) -> f64 {
    let occupied = grid.occupied_count();
    if occupied == 0 {
        return 1.0;
    }
    let happy = grid
        .positions()
        .filter(|&pos| is_happy(grid, pos, radius, threshold))
        .count();
    happy as f64 / occupied as f64
}
