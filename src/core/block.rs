//! Block module - the active falling piece
//!
//! A block is four grid squares plus derived contact sets that speed up
//! collision checks: the distinct rows it occupies, the lowest square in
//! each occupied column (bottom contacts), and the leftmost/rightmost
//! square in each occupied row (side contacts). The sets are recomputed
//! after every mutation so they are never stale.
//!
//! The order of the four squares is significant: the rotation table
//! addresses edge checks, kick probes, and per-square deltas by index.

use arrayvec::ArrayVec;

use crate::types::{BlockKind, Orientation, Point, SQUARES_PER_BLOCK};

/// Up to four contact points, fixed capacity, no allocation.
pub type ContactSet = ArrayVec<Point, SQUARES_PER_BLOCK>;

/// Up to four distinct occupied rows, ascending.
pub type RowSet = ArrayVec<i32, SQUARES_PER_BLOCK>;

/// The active falling block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub orientation: Orientation,
    /// The four squares; index order matches the rotation table.
    pub squares: [Point; SQUARES_PER_BLOCK],
    /// Distinct occupied rows, ascending.
    pub rows: RowSet,
    /// Lowest square in each occupied column.
    pub low_points: ContactSet,
    /// Leftmost square in each occupied row.
    pub left_points: ContactSet,
    /// Rightmost square in each occupied row.
    pub right_points: ContactSet,
}

impl Block {
    pub fn new(kind: BlockKind, orientation: Orientation, squares: [Point; 4]) -> Self {
        let mut block = Self {
            kind,
            orientation,
            squares,
            rows: RowSet::new(),
            low_points: ContactSet::new(),
            left_points: ContactSet::new(),
            right_points: ContactSet::new(),
        };
        block.recompute_contacts();
        block
    }

    /// Rebuild all derived sets from the four squares.
    pub fn recompute_contacts(&mut self) {
        self.rows.clear();
        for sq in &self.squares {
            if !self.rows.contains(&sq.y) {
                self.rows.push(sq.y);
            }
        }
        self.rows.sort_unstable();

        self.low_points.clear();
        for sq in &self.squares {
            match self.low_points.iter_mut().find(|p| p.x == sq.x) {
                Some(low) => {
                    if sq.y > low.y {
                        *low = *sq;
                    }
                }
                None => self.low_points.push(*sq),
            }
        }

        self.left_points.clear();
        self.right_points.clear();
        for &row in &self.rows {
            let mut left = None;
            let mut right = None;
            for sq in self.squares.iter().filter(|sq| sq.y == row) {
                if left.map_or(true, |p: Point| sq.x < p.x) {
                    left = Some(*sq);
                }
                if right.map_or(true, |p: Point| sq.x > p.x) {
                    right = Some(*sq);
                }
            }
            // Every row in `rows` has at least one square.
            if let (Some(l), Some(r)) = (left, right) {
                self.left_points.push(l);
                self.right_points.push(r);
            }
        }
    }

    /// Translate the block and all derived sets by (dx, dy).
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for sq in &mut self.squares {
            *sq = sq.offset(dx, dy);
        }
        for p in &mut self.low_points {
            *p = p.offset(dx, dy);
        }
        for p in &mut self.left_points {
            *p = p.offset(dx, dy);
        }
        for p in &mut self.right_points {
            *p = p.offset(dx, dy);
        }
        for row in &mut self.rows {
            *row += dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockKind;

    fn j_spawn() -> Block {
        Block::new(
            BlockKind::J,
            1,
            [
                Point::new(4, 3),
                Point::new(4, 2),
                Point::new(6, 3),
                Point::new(5, 3),
            ],
        )
    }

    #[test]
    fn test_rows_distinct_ascending() {
        let block = j_spawn();
        assert_eq!(block.rows.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_low_points_one_per_column() {
        let block = j_spawn();
        assert_eq!(block.low_points.len(), 3);
        assert!(block.low_points.contains(&Point::new(4, 3)));
        assert!(block.low_points.contains(&Point::new(5, 3)));
        assert!(block.low_points.contains(&Point::new(6, 3)));
    }

    #[test]
    fn test_side_points_one_per_row() {
        let block = j_spawn();
        assert_eq!(block.left_points.as_slice(), &[Point::new(4, 2), Point::new(4, 3)]);
        assert_eq!(block.right_points.as_slice(), &[Point::new(4, 2), Point::new(6, 3)]);
    }

    #[test]
    fn test_translate_moves_everything() {
        let mut block = j_spawn();
        block.translate(1, 2);
        assert_eq!(block.squares[0], Point::new(5, 5));
        assert_eq!(block.rows.as_slice(), &[4, 5]);
        assert!(block.low_points.contains(&Point::new(5, 5)));

        let recomputed = Block::new(block.kind, block.orientation, block.squares);
        assert_eq!(block, recomputed);
    }
}
