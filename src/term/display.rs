//! Shared display buffer the game paints into.
//!
//! Holds the logical picture only, one cell per grid square. Turning it
//! into characters and colors happens in the view; flushing happens in
//! the renderer. The buffer is the decoupling point between the game
//! threads and the frame loop.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use crate::core::{GameObserver, GridSink};
use crate::types::{Cell, Point, GRID_COLS, GRID_ROWS};

const CELL_COUNT: usize = (GRID_ROWS * GRID_COLS) as usize;

/// Logical mirror of the playfield, plus the notifications the HUD shows.
#[derive(Debug, Clone)]
pub struct DisplayGrid {
    cells: [Cell; CELL_COUNT],
    game_over: bool,
    last_clear: Option<(u32, bool)>,
}

impl DisplayGrid {
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            game_over: false,
            last_clear: None,
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 1 || p.x > GRID_COLS || p.y < 1 || p.y > GRID_ROWS {
            return None;
        }
        Some(((p.y - 1) * GRID_COLS + (p.x - 1)) as usize)
    }

    pub fn get(&self, p: Point) -> Cell {
        self.index(p).and_then(|i| self.cells[i])
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Most recent line clear, as (count, was a quad).
    pub fn last_clear(&self) -> Option<(u32, bool)> {
        self.last_clear
    }
}

impl Default for DisplayGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSink for DisplayGrid {
    fn paint_cell(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    fn paint_rows(&mut self, rows: RangeInclusive<i32>, cell: Cell) {
        // A blanket repaint of every row is a board reset; stale
        // notifications go with it.
        if *rows.start() <= 1 && *rows.end() >= GRID_ROWS && cell.is_none() {
            self.game_over = false;
            self.last_clear = None;
        }
        for y in rows {
            for x in 1..=GRID_COLS {
                self.paint_cell(Point::new(x, y), cell);
            }
        }
    }
}

impl GameObserver for DisplayGrid {
    fn on_lines_cleared(&mut self, count: u32, is_quad: bool) {
        self.last_clear = Some((count, is_quad));
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }
}

/// Cloneable handle handed to the engine as its paint sink.
#[derive(Clone, Default)]
pub struct SharedDisplay {
    grid: Arc<Mutex<DisplayGrid>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self {
            grid: Arc::new(Mutex::new(DisplayGrid::new())),
        }
    }

    /// Copy of the current picture for frame composition.
    pub fn snapshot(&self) -> DisplayGrid {
        match self.grid.lock() {
            Ok(grid) => grid.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut DisplayGrid) -> R) -> R {
        match self.grid.lock() {
            Ok(mut grid) => f(&mut grid),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl GridSink for SharedDisplay {
    fn paint_cell(&mut self, p: Point, cell: Cell) {
        self.with(|grid| grid.paint_cell(p, cell));
    }

    fn paint_rows(&mut self, rows: RangeInclusive<i32>, cell: Cell) {
        self.with(|grid| grid.paint_rows(rows, cell));
    }
}

impl GameObserver for SharedDisplay {
    fn on_lines_cleared(&mut self, count: u32, is_quad: bool) {
        self.with(|grid| grid.on_lines_cleared(count, is_quad));
    }

    fn on_rotate(&mut self) {}

    fn on_game_over(&mut self) {
        self.with(|grid| grid.on_game_over());
    }
}
