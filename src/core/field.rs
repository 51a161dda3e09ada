//! Field module - the settled playing grid
//!
//! A 10x23 grid of cell occupancy using flat array storage for cache
//! locality. Coordinates are 1-based: x in 1..=10 (left to right),
//! y in 1..=23 (top to bottom). Rows 1-3 are the hidden spawn rows.
//!
//! The field holds only settled squares; the active block is never
//! written here until it locks.

use crate::types::{Cell, Point, GRID_COLS, GRID_ROWS};

/// Total number of cells on the field
const FIELD_SIZE: usize = (GRID_COLS * GRID_ROWS) as usize;

/// The settled playing grid
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Flat array of cells, row-major order ((y-1) * COLS + (x-1))
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    /// Calculate flat index from 1-based (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 1 || x > GRID_COLS || y < 1 || y > GRID_ROWS {
            return None;
        }
        Some(((y - 1) * GRID_COLS + (x - 1)) as usize)
    }

    /// Get cell at position; None if out of bounds
    pub fn get(&self, p: Point) -> Option<Cell> {
        Self::index(p.x, p.y).map(|idx| self.cells[idx])
    }

    /// Set cell at position; false if out of bounds
    pub fn set(&mut self, p: Point, cell: Cell) -> bool {
        match Self::index(p.x, p.y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_empty(&self, p: Point) -> bool {
        matches!(self.get(p), Some(None))
    }

    /// In bounds and filled. Out-of-bounds probes count as occupied so
    /// collision checks reject motion past the boundary.
    pub fn is_occupied(&self, p: Point) -> bool {
        !self.is_empty(p)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 1 || y > GRID_ROWS {
            return false;
        }
        let start = ((y - 1) * GRID_COLS) as usize;
        let end = start + GRID_COLS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`: every row above it shifts down one, row 1
    /// becomes empty. Rows below `y` are untouched.
    pub fn collapse_row(&mut self, y: i32) {
        if y < 1 || y > GRID_ROWS {
            return;
        }
        let width = GRID_COLS as usize;
        for row in (2..=y as usize).rev() {
            let src_start = (row - 2) * width;
            let dst_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Row contents as a slice (for projection and tests)
    pub fn row(&self, y: i32) -> &[Cell] {
        assert!((1..=GRID_ROWS).contains(&y), "row {} out of range", y);
        let start = ((y - 1) * GRID_COLS) as usize;
        &self.cells[start..start + GRID_COLS as usize]
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
