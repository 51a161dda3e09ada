//! Session module - one game's complete state and its operations
//!
//! Ties together the field, the active block, the rotation tables and
//! the spawner. Shifts and rotations are silently rejected when illegal;
//! the fall tick either moves the block one row or locks it, clears
//! lines, and respawns. A spawn collision ends the game.
//!
//! The session itself is not thread-safe and carries no gating: the
//! driver boundary (`engine::SharedSession`) serializes access and
//! checks the paused/game-over flags before dispatching.

use crate::core::{rotate, spawn_block, Block, Field, GameObserver, Spawner};
use crate::types::{
    drop_interval_ms, level_for_lines, BlockKind, Point, RotationDir, ShiftDir, SpawnPolicy,
    GRID_COLS, GRID_ROWS, SOFT_DROP_MS,
};

/// Outcome of one fall tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The block moved down one row.
    Moved,
    /// The block was grounded; it locked and a new block spawned.
    Locked { lines_cleared: u32 },
    /// The block locked and the replacement collided at spawn.
    GameOver,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    field: Field,
    active: Option<Block>,
    spawner: Spawner,
    lines: u32,
    level: u32,
    paused: bool,
    game_over: bool,
    soft_dropping: bool,
}

impl GameSession {
    pub fn new(seed: u32, policy: SpawnPolicy) -> Self {
        Self {
            field: Field::new(),
            active: None,
            spawner: Spawner::new(seed, policy),
            lines: 0,
            level: 1,
            paused: false,
            game_over: false,
            soft_dropping: false,
        }
    }

    /// Reset everything and spawn the first block.
    pub fn start(&mut self, sink: &mut dyn GameObserver) {
        self.field.clear();
        sink.paint_rows(1..=GRID_ROWS, None);
        self.active = None;
        self.lines = 0;
        self.level = 1;
        self.paused = false;
        self.game_over = false;
        self.soft_dropping = false;
        self.spawner.reset();
        self.spawn_next(sink);
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn active(&self) -> Option<&Block> {
        self.active.as_ref()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct grid access for scenario setup.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// While a soft drop is held the session reports the fast interval;
    /// the row-step algorithm itself never changes.
    pub fn set_soft_drop(&mut self, on: bool) {
        self.soft_dropping = on;
    }

    /// Current delay between fall ticks, in milliseconds.
    pub fn drop_interval_ms(&self) -> u64 {
        if self.soft_dropping {
            SOFT_DROP_MS
        } else {
            drop_interval_ms(self.level)
        }
    }

    /// Try to shift the active block one column.
    ///
    /// Rejected (false, no mutation) when any square sits at the wall or
    /// a side-contact square's neighbor is occupied.
    pub fn shift(&mut self, dir: ShiftDir, sink: &mut dyn GameObserver) -> bool {
        let Some(block) = self.active.as_mut() else {
            return false;
        };

        let (dx, wall, contacts) = match dir {
            ShiftDir::Left => (-1, 1, &block.left_points),
            ShiftDir::Right => (1, GRID_COLS, &block.right_points),
        };

        if block.squares.iter().any(|sq| sq.x == wall) {
            return false;
        }
        if contacts
            .iter()
            .any(|p| self.field.is_occupied(p.offset(dx, 0)))
        {
            return false;
        }

        let old = block.squares;
        block.translate(dx, 0);
        repaint_move(&old, &block.squares, block.kind, sink);
        true
    }

    /// Try to rotate the active block.
    ///
    /// O is a legal no-op. Everything else consults the rotation table;
    /// a failed edge precondition or occupied kick probe rejects the
    /// turn without mutation.
    pub fn rotate(&mut self, dir: RotationDir, sink: &mut dyn GameObserver) -> bool {
        let Some(block) = self.active.as_ref() else {
            return false;
        };

        if block.kind == BlockKind::O {
            sink.on_rotate();
            return true;
        }

        let Some(rotated) = rotate(block, &self.field, dir) else {
            return false;
        };

        let old = block.squares;
        repaint_move(&old, &rotated.squares, rotated.kind, sink);
        self.active = Some(rotated);
        sink.on_rotate();
        true
    }

    /// One fall tick: move the block down a row, or lock it, clear
    /// lines, and spawn the next block.
    pub fn advance(&mut self, sink: &mut dyn GameObserver) -> Advance {
        let Some(block) = self.active.as_mut() else {
            return Advance::GameOver;
        };

        let grounded = block
            .low_points
            .iter()
            .any(|p| p.y == GRID_ROWS || self.field.is_occupied(p.offset(0, 1)));

        if !grounded {
            let old = block.squares;
            block.translate(0, 1);
            repaint_move(&old, &block.squares, block.kind, sink);
            return Advance::Moved;
        }

        let lines_cleared = self.lock_active(sink);
        if self.spawn_next(sink) {
            Advance::Locked { lines_cleared }
        } else {
            Advance::GameOver
        }
    }

    /// Commit the active block into the field, then clear any rows it
    /// completed. Returns the number of rows cleared.
    fn lock_active(&mut self, sink: &mut dyn GameObserver) -> u32 {
        let Some(block) = self.active.take() else {
            return 0;
        };

        for sq in &block.squares {
            self.field.set(*sq, Some(block.kind));
        }

        // Scan only the rows the block occupied, in ascending order, and
        // collapse each full one in discovery order.
        let full_rows: Vec<i32> = block
            .rows
            .iter()
            .copied()
            .filter(|&y| self.field.is_row_full(y))
            .collect();

        for &row in &full_rows {
            self.field.collapse_row(row);
            // Repaint everything that moved: rows 1..=row now hold the
            // shifted contents.
            sink.paint_rows(1..=1, None);
            for y in 2..=row {
                for x in 1..=GRID_COLS {
                    let p = Point::new(x, y);
                    if let Some(cell) = self.field.get(p) {
                        sink.paint_cell(p, cell);
                    }
                }
            }
        }

        let cleared = full_rows.len() as u32;
        if cleared > 0 {
            self.lines += cleared;
            self.level = level_for_lines(self.lines);
            sink.on_lines_cleared(cleared, cleared == 4);
        }
        cleared
    }

    /// Spawn the next block. Returns false on spawn collision (game
    /// over); the overlapping squares are still painted, last write
    /// wins, to leave the frozen terminal picture.
    fn spawn_next(&mut self, sink: &mut dyn GameObserver) -> bool {
        let kind = self.spawner.next_kind();
        let block = spawn_block(kind);

        let collided = block.squares.iter().any(|sq| {
            matches!(self.field.get(*sq), Some(Some(_)))
        });

        for sq in &block.squares {
            sink.paint_cell(*sq, Some(kind));
        }

        if collided {
            self.game_over = true;
            self.active = None;
            sink.on_game_over();
            return false;
        }

        self.active = Some(block);
        true
    }
}

/// Erase the squares the block vacated and paint the new ones. Squares
/// covered by both old and new positions are painted once, not blanked
/// in between.
fn repaint_move(old: &[Point; 4], new: &[Point; 4], kind: BlockKind, sink: &mut dyn GameObserver) {
    for p in old {
        if !new.contains(p) {
            sink.paint_cell(*p, None);
        }
    }
    for sq in new {
        sink.paint_cell(*sq, Some(kind));
    }
}
