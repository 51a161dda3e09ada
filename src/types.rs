//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Playing area dimensions. Only the lower 20 rows are visible; rows 1-3
/// are the hidden spawn rows.
pub const GRID_ROWS: i32 = 23;
pub const GRID_COLS: i32 = 10;
pub const HIDDEN_ROWS: i32 = 3;

/// Squares per falling block.
pub const SQUARES_PER_BLOCK: usize = 4;

/// Drop timing (in milliseconds)
pub const BASE_DROP_MS: u64 = 1000;
pub const LEVEL_SPEEDUP_MS: u64 = 75;
pub const MIN_DROP_MS: u64 = 100;
pub const SOFT_DROP_MS: u64 = 50;

/// How long a held soft-drop key stays "held" in terminals that do not
/// emit key release events.
pub const SOFT_DROP_GRACE_MS: u64 = 150;

/// Falling block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl BlockKind {
    /// All kinds in spawn-table order. S and Z sit at the end so the
    /// first-piece policy can exclude them by index.
    pub const ALL: [BlockKind; 7] = [
        BlockKind::I,
        BlockKind::J,
        BlockKind::L,
        BlockKind::O,
        BlockKind::T,
        BlockKind::S,
        BlockKind::Z,
    ];
}

/// Grid coordinate. x runs 1..=GRID_COLS left to right, y runs
/// 1..=GRID_ROWS top to bottom; (1, 1) is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cell on the grid (None = empty, Some = filled with a block kind).
/// The kind carries the display color; the presentation layer maps it.
pub type Cell = Option<BlockKind>;

/// Discrete orientation of the active block. Spawn state is 1;
/// clockwise rotation walks 1 -> 2 -> 3 -> 4 -> 1.
pub type Orientation = u8;

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDir {
    Clockwise,
    CounterClockwise,
}

/// Horizontal shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDir {
    Left,
    Right,
}

/// Commands the UI layer produces; the engine consumes nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    ShiftLeft,
    ShiftRight,
    RotateCw,
    RotateCcw,
    SoftDropOn,
    SoftDropOff,
    Pause,
    Start,
    Quit,
}

/// Piece selection policy. `Random` draws uniformly, except that the
/// first piece of a game is never S or Z; `Fixed` forces every spawn
/// to one kind (scenario and test aid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    Random,
    Fixed(BlockKind),
}

/// Level for a given lines-cleared total: one level per ten lines.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / 10 + 1
}

/// Drop interval for a level, clamped so high levels stay playable.
pub fn drop_interval_ms(level: u32) -> u64 {
    let speedup = LEVEL_SPEEDUP_MS.saturating_mul(level.saturating_sub(1) as u64);
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_formula() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(19), 2);
        assert_eq!(level_for_lines(20), 3);
        assert_eq!(level_for_lines(135), 14);
    }

    #[test]
    fn test_drop_interval_clamped() {
        assert_eq!(drop_interval_ms(1), BASE_DROP_MS);
        assert_eq!(drop_interval_ms(2), BASE_DROP_MS - LEVEL_SPEEDUP_MS);
        // High enough levels hit the floor instead of going non-positive.
        assert_eq!(drop_interval_ms(1000), MIN_DROP_MS);
    }

    #[test]
    fn test_kind_order_puts_s_and_z_last() {
        assert_eq!(BlockKind::ALL[5], BlockKind::S);
        assert_eq!(BlockKind::ALL[6], BlockKind::Z);
    }
}
