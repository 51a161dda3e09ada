//! Spawner module - next-kind selection and fixed spawn layouts
//!
//! Each kind has one fixed spawn layout (orientation 1, squares over the
//! hidden rows near the center). The spawn table is independent of the
//! rotation table; the square order here is what the rotation entries
//! index against.
//!
//! Selection: the first piece of a game never spawns S or Z (an S/Z
//! opening forces an immediate overhang); every later piece is uniform
//! over all seven kinds with no bag or history.

use crate::core::{Block, SimpleRng};
use crate::types::{BlockKind, Point, SpawnPolicy};

/// Build a kind's spawn-state block.
pub fn spawn_block(kind: BlockKind) -> Block {
    let squares = match kind {
        BlockKind::I => [
            Point::new(7, 4),
            Point::new(4, 4),
            Point::new(5, 4),
            Point::new(6, 4),
        ],
        BlockKind::J => [
            Point::new(4, 3),
            Point::new(4, 2),
            Point::new(6, 3),
            Point::new(5, 3),
        ],
        BlockKind::L => [
            Point::new(5, 3),
            Point::new(4, 3),
            Point::new(6, 3),
            Point::new(6, 2),
        ],
        BlockKind::O => [
            Point::new(5, 1),
            Point::new(5, 2),
            Point::new(6, 1),
            Point::new(6, 2),
        ],
        BlockKind::S => [
            Point::new(6, 2),
            Point::new(4, 3),
            Point::new(5, 2),
            Point::new(5, 3),
        ],
        BlockKind::T => [
            Point::new(5, 1),
            Point::new(4, 2),
            Point::new(5, 2),
            Point::new(6, 2),
        ],
        BlockKind::Z => [
            Point::new(4, 2),
            Point::new(6, 3),
            Point::new(5, 2),
            Point::new(5, 3),
        ],
    };
    Block::new(kind, 1, squares)
}

/// Selects the kind of each new piece.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
    policy: SpawnPolicy,
    first_done: bool,
}

impl Spawner {
    pub fn new(seed: u32, policy: SpawnPolicy) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            policy,
            first_done: false,
        }
    }

    /// Forget spawn history; the next draw counts as a first piece again.
    pub fn reset(&mut self) {
        self.first_done = false;
    }

    /// Draw the next kind.
    pub fn next_kind(&mut self) -> BlockKind {
        if let SpawnPolicy::Fixed(kind) = self.policy {
            return kind;
        }
        if !self.first_done {
            self.first_done = true;
            // S and Z sit at the end of ALL; excluding the last two
            // indices excludes exactly them.
            return BlockKind::ALL[self.rng.next_range(BlockKind::ALL.len() as u32 - 2) as usize];
        }
        BlockKind::ALL[self.rng.next_range(BlockKind::ALL.len() as u32) as usize]
    }
}
