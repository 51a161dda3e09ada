//! Observer module - the narrow boundary between the engine and its
//! presentation collaborator
//!
//! The engine owns a logical occupancy grid and treats the display as a
//! pure projection: every cell it colors or erases goes out through
//! `GridSink`, and game events go out through the `GameObserver` hooks.
//! Implementations must be non-blocking and must not reenter the engine.

use std::ops::RangeInclusive;

use crate::types::{Cell, Point};

/// Receives per-cell paint calls.
pub trait GridSink {
    /// Set one display cell (None erases it).
    fn paint_cell(&mut self, p: Point, cell: Cell);

    /// Set a whole range of rows to one value; used for clearing rows
    /// and for full-board reset.
    fn paint_rows(&mut self, rows: RangeInclusive<i32>, cell: Cell);
}

/// Notification hooks for presentation (sound, score display).
/// Purely observational; the engine never consults a return value.
pub trait GameObserver: GridSink {
    fn on_lines_cleared(&mut self, _count: u32, _is_quad: bool) {}
    fn on_rotate(&mut self) {}
    fn on_game_over(&mut self) {}
}

/// Sink that ignores everything; used for headless play and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl GridSink for NullSink {
    fn paint_cell(&mut self, _p: Point, _cell: Cell) {}
    fn paint_rows(&mut self, _rows: RangeInclusive<i32>, _cell: Cell) {}
}

impl GameObserver for NullSink {}
