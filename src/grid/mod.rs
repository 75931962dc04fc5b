//! Grid storage for the segregation model

use std::fmt;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Cell, Position};

/// Square grid of cells, row-major.
///
/// Mutation goes through the bounds-checked `set`; out-of-bounds writes are
/// rejected rather than panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

/// Cell counts derived from the configured fractions.
///
/// The vacant count is floored against the whole grid, the red count against
/// the remaining capacity; blue absorbs the rounding remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    pub vacant: usize,
    pub red: usize,
    pub blue: usize,
}

impl Population {
    pub fn from_fractions(size: usize, vacant_fraction: f64, red_fraction: f64) -> Self {
        let total = size * size;
        let vacant = (vacant_fraction * total as f64) as usize;
        let red = (red_fraction * (total - vacant) as f64) as usize;
        let blue = total - vacant - red;
        Self { vacant, red, blue }
    }
}

impl Grid {
    /// Create a fully vacant grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Vacant; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos.row, pos.col) {
            Some(self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    /// Set a cell, returning false if the position is out of bounds.
    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if self.in_bounds(pos.row, pos.col) {
            self.cells[pos.row * self.size + pos.col] = cell;
            true
        } else {
            false
        }
    }

    /// Cycle a cell through Vacant -> Red -> Blue -> Vacant.
    pub fn shift(&mut self, pos: Position) -> bool {
        match self.get(pos) {
            Some(cell) => self.set(pos, cell.shifted()),
            None => false,
        }
    }

    /// Row-major iterator over every position.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Replace the whole grid contents with a uniformly shuffled population.
    pub fn repopulate(&mut self, population: Population, rng: &mut ChaCha8Rng) {
        debug_assert_eq!(
            population.vacant + population.red + population.blue,
            self.size * self.size
        );
        self.cells.clear();
        self.cells
            .extend(std::iter::repeat(Cell::Red).take(population.red));
        self.cells
            .extend(std::iter::repeat(Cell::Blue).take(population.blue));
        self.cells
            .extend(std::iter::repeat(Cell::Vacant).take(population.vacant));
        self.cells.shuffle(rng);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let glyph = match self.cells[row * self.size + col] {
                    Cell::Vacant => '.',
                    Cell::Red => 'R',
                    Cell::Blue => 'B',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
