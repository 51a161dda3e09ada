//! Rotation module - per-kind orientation transition tables
//!
//! Every (kind, orientation, direction) has a fixed rule: an edge
//! precondition on named squares, the board cells that must be empty for
//! the turn to be legal (kick probes, offsets from named reference
//! squares), the exact delta applied to each of the four squares, and
//! the resulting orientation. The pivots are asymmetric per kind, so the
//! rules are enumerated data rather than a derived matrix rotation.
//!
//! O never changes shape. I, S and Z toggle between two orientations and
//! use the same entry for either direction. J, L and T walk
//! 1 -> 2 -> 3 -> 4 -> 1 clockwise and the reverse counter-clockwise.
//!
//! Kick probes that land outside the grid count as blocked.

use crate::core::{Block, Field};
use crate::types::{BlockKind, Orientation, RotationDir, SQUARES_PER_BLOCK};

/// Edge precondition evaluated against the current squares.
#[derive(Debug, Clone, Copy)]
pub enum EdgeRule {
    /// Reject unless squares[square].x >= col
    MinCol { square: usize, col: i32 },
    /// Reject unless squares[square].x <= col
    MaxCol { square: usize, col: i32 },
}

/// A board cell that must be empty, as an offset from one of the
/// block's current squares.
#[derive(Debug, Clone, Copy)]
pub struct Kick {
    pub square: usize,
    pub dx: i32,
    pub dy: i32,
}

const fn kick(square: usize, dx: i32, dy: i32) -> Kick {
    Kick { square, dx, dy }
}

/// One transition of the rotation table.
#[derive(Debug, Clone, Copy)]
pub struct RotationRule {
    pub to_orientation: Orientation,
    pub edge: &'static [EdgeRule],
    pub kicks: &'static [Kick],
    /// Per-square (dx, dy), indexed like `Block::squares`.
    pub deltas: [(i32, i32); SQUARES_PER_BLOCK],
}

/// I toggles 1 <-> 2 (horizontal <-> vertical), pivot on square 3.
static I_RULES: [RotationRule; 2] = [
    // 1 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(3, 0, -1), kick(3, 0, -2), kick(3, 0, -3)],
        deltas: [(-1, -3), (2, -2), (1, -1), (0, 0)],
    },
    // 2 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[
            EdgeRule::MinCol { square: 3, col: 3 },
            EdgeRule::MaxCol { square: 3, col: 9 },
        ],
        kicks: &[kick(3, -2, 0), kick(3, -1, 0), kick(3, 1, 0)],
        deltas: [(1, 3), (-2, 2), (-1, 1), (0, 0)],
    },
];

/// S toggles 1 <-> 2, pivot on squares 2/3.
static S_RULES: [RotationRule; 2] = [
    // 1 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(2, -1, 0), kick(2, -1, -1)],
        deltas: [(-2, -1), (0, -1), (0, 0), (0, 0)],
    },
    // 2 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MaxCol { square: 2, col: 9 }],
        kicks: &[kick(2, 1, 0), kick(3, -1, 0)],
        deltas: [(2, 1), (0, 1), (0, 0), (0, 0)],
    },
];

/// Z toggles 1 <-> 2, mirror of S.
static Z_RULES: [RotationRule; 2] = [
    // 1 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(2, 1, 0), kick(2, 1, -1)],
        deltas: [(2, -1), (0, -1), (0, 0), (0, 0)],
    },
    // 2 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MinCol { square: 2, col: 2 }],
        kicks: &[kick(2, -1, 0), kick(3, 1, 0)],
        deltas: [(-2, 1), (0, 1), (0, 0), (0, 0)],
    },
];

static J_CW: [RotationRule; 4] = [
    // 1 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(3, 0, -1), kick(3, 0, -2), kick(3, 1, -2)],
        deltas: [(2, -2), (1, 0), (-1, -2), (0, 0)],
    },
    // 2 -> 3
    RotationRule {
        to_orientation: 3,
        edge: &[EdgeRule::MinCol { square: 3, col: 2 }],
        kicks: &[kick(1, -1, 0), kick(1, 1, 0), kick(1, 1, 1)],
        deltas: [(0, 2), (0, 0), (1, 1), (-1, -1)],
    },
    // 3 -> 4
    RotationRule {
        to_orientation: 4,
        edge: &[],
        kicks: &[kick(2, 0, -1), kick(0, -1, 0)],
        deltas: [(0, -2), (1, 0), (0, 1), (1, 1)],
    },
    // 4 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MinCol { square: 3, col: 2 }],
        kicks: &[kick(3, -1, 0), kick(3, -1, -1)],
        deltas: [(-2, 2), (-2, 0), (0, 0), (0, 0)],
    },
];

static J_CCW: [RotationRule; 4] = [
    // 1 -> 4
    RotationRule {
        to_orientation: 4,
        edge: &[],
        kicks: &[kick(2, 0, -1), kick(2, 0, -2)],
        deltas: [(2, -2), (2, 0), (0, 0), (0, 0)],
    },
    // 2 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MinCol { square: 3, col: 2 }],
        kicks: &[kick(3, 1, 0), kick(3, -1, 0), kick(3, -1, -1)],
        deltas: [(-2, 2), (-1, 0), (1, 2), (0, 0)],
    },
    // 3 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(1, 0, -1), kick(1, 0, 1), kick(1, 1, -1)],
        deltas: [(0, -2), (0, 0), (-1, -1), (1, 1)],
    },
    // 4 -> 3
    RotationRule {
        to_orientation: 3,
        edge: &[EdgeRule::MinCol { square: 3, col: 2 }],
        kicks: &[kick(1, -1, 0), kick(1, -2, 0)],
        deltas: [(0, 2), (-1, 0), (0, -1), (-1, -1)],
    },
];

static L_CW: [RotationRule; 4] = [
    // 1 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(0, 0, -1), kick(0, 0, -2)],
        deltas: [(0, -2), (1, -1), (-1, 0), (0, 1)],
    },
    // 2 -> 3
    RotationRule {
        to_orientation: 3,
        edge: &[EdgeRule::MinCol { square: 2, col: 2 }],
        kicks: &[kick(1, -1, 0), kick(1, 1, 0), kick(1, -1, 1)],
        deltas: [(-1, 1), (0, 0), (-1, 0), (0, -1)],
    },
    // 3 -> 4
    RotationRule {
        to_orientation: 4,
        edge: &[],
        kicks: &[kick(3, 0, -1), kick(3, 0, 1), kick(3, -1, -1)],
        deltas: [(2, -1), (0, -1), (2, 0), (0, 0)],
    },
    // 4 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MinCol { square: 1, col: 2 }],
        kicks: &[kick(2, -1, 0), kick(2, -2, 0)],
        deltas: [(-1, 2), (-1, 2), (0, 0), (0, 0)],
    },
];

static L_CCW: [RotationRule; 4] = [
    // 1 -> 4
    RotationRule {
        to_orientation: 4,
        edge: &[],
        kicks: &[kick(3, 0, -1), kick(3, -1, -1)],
        deltas: [(1, -2), (1, -2), (0, 0), (0, 0)],
    },
    // 2 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MinCol { square: 1, col: 2 }],
        kicks: &[kick(2, -1, 0), kick(3, 0, -1)],
        deltas: [(0, 2), (-1, 1), (1, 0), (0, -1)],
    },
    // 3 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(1, 0, -1), kick(1, 0, 1), kick(1, 1, 1)],
        deltas: [(1, -1), (0, 0), (1, 0), (0, 1)],
    },
    // 4 -> 3
    RotationRule {
        to_orientation: 3,
        edge: &[EdgeRule::MinCol { square: 2, col: 3 }],
        kicks: &[kick(3, -1, 0), kick(3, -2, 0), kick(3, -2, 1)],
        deltas: [(-2, 1), (0, 1), (-2, 0), (0, 0)],
    },
];

static T_CW: [RotationRule; 4] = [
    // 1 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(2, 0, 1)],
        deltas: [(0, 0), (1, 1), (0, 0), (0, 0)],
    },
    // 2 -> 3
    RotationRule {
        to_orientation: 3,
        edge: &[EdgeRule::MinCol { square: 2, col: 2 }],
        kicks: &[kick(2, -1, 0)],
        deltas: [(-1, 1), (0, 0), (0, 0), (0, 0)],
    },
    // 3 -> 4
    RotationRule {
        to_orientation: 4,
        edge: &[],
        kicks: &[kick(2, 0, -1)],
        deltas: [(0, 0), (0, 0), (0, 0), (-1, -1)],
    },
    // 4 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MaxCol { square: 2, col: 9 }],
        kicks: &[kick(2, 1, 0)],
        deltas: [(1, -1), (-1, -1), (0, 0), (1, 1)],
    },
];

static T_CCW: [RotationRule; 4] = [
    // 1 -> 4
    RotationRule {
        to_orientation: 4,
        edge: &[],
        kicks: &[kick(2, 0, -1)],
        deltas: [(-1, 1), (1, 1), (0, 0), (-1, -1)],
    },
    // 2 -> 1
    RotationRule {
        to_orientation: 1,
        edge: &[EdgeRule::MinCol { square: 2, col: 2 }],
        kicks: &[kick(2, -1, 0)],
        deltas: [(0, 0), (-1, -1), (0, 0), (0, 0)],
    },
    // 3 -> 2
    RotationRule {
        to_orientation: 2,
        edge: &[],
        kicks: &[kick(2, 0, -1)],
        deltas: [(1, -1), (0, 0), (0, 0), (0, 0)],
    },
    // 4 -> 3
    RotationRule {
        to_orientation: 3,
        edge: &[EdgeRule::MaxCol { square: 2, col: 9 }],
        kicks: &[kick(2, 1, 0)],
        deltas: [(0, 0), (0, 0), (0, 0), (1, 1)],
    },
];

/// Look up the transition for (kind, orientation, direction).
///
/// Returns None for O (no rotation effect) and for orientations outside
/// the kind's range, which callers treat as a rejected turn.
pub fn rule_for(
    kind: BlockKind,
    orientation: Orientation,
    dir: RotationDir,
) -> Option<&'static RotationRule> {
    let table: &'static [RotationRule] = match (kind, dir) {
        (BlockKind::O, _) => return None,
        // Single-axis kinds use the same toggle in either direction.
        (BlockKind::I, _) => &I_RULES,
        (BlockKind::S, _) => &S_RULES,
        (BlockKind::Z, _) => &Z_RULES,
        (BlockKind::J, RotationDir::Clockwise) => &J_CW,
        (BlockKind::J, RotationDir::CounterClockwise) => &J_CCW,
        (BlockKind::L, RotationDir::Clockwise) => &L_CW,
        (BlockKind::L, RotationDir::CounterClockwise) => &L_CCW,
        (BlockKind::T, RotationDir::Clockwise) => &T_CW,
        (BlockKind::T, RotationDir::CounterClockwise) => &T_CCW,
    };
    (orientation as usize)
        .checked_sub(1)
        .and_then(|i| table.get(i))
}

/// Try to rotate a block against the field.
///
/// Returns the rotated block, or None when the edge precondition fails,
/// any kick probe is occupied, or no rule exists. Rejection never
/// mutates anything; O is handled by the caller as a legal no-op.
pub fn rotate(block: &Block, field: &Field, dir: RotationDir) -> Option<Block> {
    let rule = rule_for(block.kind, block.orientation, dir)?;

    for edge in rule.edge {
        match *edge {
            EdgeRule::MinCol { square, col } => {
                if block.squares[square].x < col {
                    return None;
                }
            }
            EdgeRule::MaxCol { square, col } => {
                if block.squares[square].x > col {
                    return None;
                }
            }
        }
    }

    for k in rule.kicks {
        let probe = block.squares[k.square].offset(k.dx, k.dy);
        if field.is_occupied(probe) {
            return None;
        }
    }

    let mut squares = block.squares;
    for (sq, &(dx, dy)) in squares.iter_mut().zip(rule.deltas.iter()) {
        *sq = sq.offset(dx, dy);
    }
    Some(Block::new(block.kind, rule.to_orientation, squares))
}
