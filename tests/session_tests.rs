//! End-to-end session scenarios: drops, locks, line clears, game over,
//! and the display mirror staying consistent with the logical field.

use blockdrop::core::{Advance, GameObserver, GameSession, NullSink};
use blockdrop::term::DisplayGrid;
use blockdrop::types::{
    drop_interval_ms, BlockKind, Point, RotationDir, ShiftDir, SpawnPolicy, GRID_COLS, GRID_ROWS,
    SOFT_DROP_MS,
};

fn fixed_session(kind: BlockKind) -> (GameSession, DisplayGrid) {
    let mut sink = DisplayGrid::new();
    let mut session = GameSession::new(1, SpawnPolicy::Fixed(kind));
    session.start(&mut sink);
    (session, sink)
}

/// Every display cell must match the field, with the active block's
/// squares drawn on top.
fn assert_mirror(session: &GameSession, grid: &DisplayGrid) {
    for y in 1..=GRID_ROWS {
        for x in 1..=GRID_COLS {
            let p = Point::new(x, y);
            let expected = match session.active() {
                Some(block) if block.squares.contains(&p) => Some(block.kind),
                _ => session.field().get(p).flatten(),
            };
            assert_eq!(grid.get(p), expected, "mismatch at {:?}", p);
        }
    }
}

fn drop_to_lock(session: &mut GameSession, sink: &mut dyn GameObserver) -> u32 {
    for _ in 0..GRID_ROWS {
        match session.advance(sink) {
            Advance::Moved => continue,
            Advance::Locked { lines_cleared } => return lines_cleared,
            Advance::GameOver => panic!("unexpected game over"),
        }
    }
    panic!("block never locked");
}

#[test]
fn o_drops_into_the_corner() {
    let (mut session, mut sink) = fixed_session(BlockKind::O);
    for _ in 0..3 {
        assert!(session.shift(ShiftDir::Right, &mut sink));
    }
    let cleared = drop_to_lock(&mut session, &mut sink);
    assert_eq!(cleared, 0);

    for p in [
        Point::new(8, 22),
        Point::new(8, 23),
        Point::new(9, 22),
        Point::new(9, 23),
    ] {
        assert_eq!(session.field().get(p), Some(Some(BlockKind::O)));
    }
    // The replacement is already falling.
    assert!(session.active().is_some());
    assert_eq!(session.lines(), 0);
    assert_mirror(&session, &sink);
}

#[test]
fn shift_stops_at_the_walls() {
    let (mut session, mut sink) = fixed_session(BlockKind::O);
    // O spawns in columns 5 and 6; four steps reach the right wall.
    for _ in 0..4 {
        assert!(session.shift(ShiftDir::Right, &mut sink));
    }
    assert!(!session.shift(ShiftDir::Right, &mut sink));
    let squares = session.active().unwrap().squares;
    assert!(squares.iter().all(|sq| sq.x == 9 || sq.x == 10));

    for _ in 0..8 {
        assert!(session.shift(ShiftDir::Left, &mut sink));
    }
    assert!(!session.shift(ShiftDir::Left, &mut sink));
    assert_mirror(&session, &sink);
}

#[test]
fn shift_is_blocked_by_locked_cells() {
    let (mut session, mut sink) = fixed_session(BlockKind::O);
    // Wall of locked cells in column 7, beside the spawn position.
    for y in 1..=GRID_ROWS {
        session.field_mut().set(Point::new(7, y), Some(BlockKind::I));
    }
    assert!(!session.shift(ShiftDir::Right, &mut sink));
    assert!(session.shift(ShiftDir::Left, &mut sink));
}

#[test]
fn completed_row_clears_and_counts() {
    let (mut session, mut sink) = fixed_session(BlockKind::I);
    // Bottom row full except the four columns the I will land on.
    for x in [1, 2, 3, 8, 9, 10] {
        session
            .field_mut()
            .set(Point::new(x, GRID_ROWS), Some(BlockKind::J));
    }

    let cleared = drop_to_lock(&mut session, &mut sink);
    assert_eq!(cleared, 1);
    assert_eq!(session.lines(), 1);
    assert_eq!(session.level(), 1);

    // Nothing was above the cleared row, so the board below the new
    // block is empty again.
    for x in 1..=GRID_COLS {
        assert_eq!(session.field().get(Point::new(x, GRID_ROWS)), Some(None));
    }
    assert_eq!(sink.last_clear(), Some((1, false)));
    assert_mirror(&session, &sink);
}

#[test]
fn rows_above_a_clear_shift_down() {
    let (mut session, mut sink) = fixed_session(BlockKind::I);
    // A marker two rows up, off the I's landing columns.
    session
        .field_mut()
        .set(Point::new(1, GRID_ROWS - 2), Some(BlockKind::T));
    for x in [1, 2, 3, 8, 9, 10] {
        session
            .field_mut()
            .set(Point::new(x, GRID_ROWS), Some(BlockKind::J));
    }

    // The I lands on the floor row and completes it; the marker row is
    // untouched by the landing but inherits the collapse.
    let cleared = drop_to_lock(&mut session, &mut sink);
    assert_eq!(cleared, 1);
    assert_eq!(
        session.field().get(Point::new(1, GRID_ROWS - 1)),
        Some(Some(BlockKind::T))
    );
    assert_eq!(session.field().get(Point::new(1, GRID_ROWS - 2)), Some(None));
    assert_mirror(&session, &sink);
}

#[test]
fn vertical_i_scores_a_quad() {
    let (mut session, mut sink) = fixed_session(BlockKind::I);
    // Four bottom rows complete except column 6.
    for y in (GRID_ROWS - 3)..=GRID_ROWS {
        for x in 1..=GRID_COLS {
            if x != 6 {
                session.field_mut().set(Point::new(x, y), Some(BlockKind::L));
            }
        }
    }

    // Stand the I up; it folds into column 6.
    assert!(session.rotate(RotationDir::Clockwise, &mut sink));
    let cleared = drop_to_lock(&mut session, &mut sink);
    assert_eq!(cleared, 4);
    assert_eq!(session.lines(), 4);
    assert_eq!(sink.last_clear(), Some((4, true)));

    for y in (GRID_ROWS - 3)..=GRID_ROWS {
        for x in 1..=GRID_COLS {
            assert_eq!(session.field().get(Point::new(x, y)), Some(None));
        }
    }
    assert_mirror(&session, &sink);
}

#[test]
fn level_rises_every_ten_lines_and_speeds_up() {
    let (mut session, mut sink) = fixed_session(BlockKind::I);
    assert_eq!(session.level(), 1);
    let base = session.drop_interval_ms();

    // Clear ten single rows; each pass refills the floor row around
    // the I's landing columns.
    for _ in 0..10 {
        for x in [1, 2, 3, 8, 9, 10] {
            session
                .field_mut()
                .set(Point::new(x, GRID_ROWS), Some(BlockKind::J));
        }
        let cleared = drop_to_lock(&mut session, &mut sink);
        assert_eq!(cleared, 1);
    }

    assert_eq!(session.lines(), 10);
    assert_eq!(session.level(), 2);
    assert!(session.drop_interval_ms() < base);
    assert_eq!(session.drop_interval_ms(), drop_interval_ms(2));
}

#[test]
fn soft_drop_swaps_the_interval_only() {
    let (mut session, _sink) = fixed_session(BlockKind::T);
    let normal = session.drop_interval_ms();
    session.set_soft_drop(true);
    assert_eq!(session.drop_interval_ms(), SOFT_DROP_MS);
    session.set_soft_drop(false);
    assert_eq!(session.drop_interval_ms(), normal);
}

#[test]
fn stacking_to_the_top_ends_the_game() {
    let (mut session, mut sink) = fixed_session(BlockKind::O);
    let mut ended = false;
    for _ in 0..10_000 {
        match session.advance(&mut sink) {
            Advance::GameOver => {
                ended = true;
                break;
            }
            _ => continue,
        }
    }
    assert!(ended, "stacking O blocks never ended the game");
    assert!(session.game_over());
    assert!(session.active().is_none());
    assert!(sink.game_over());
}

#[test]
fn start_resets_a_finished_game() {
    let (mut session, mut sink) = fixed_session(BlockKind::O);
    while !matches!(session.advance(&mut sink), Advance::GameOver) {}
    assert!(session.game_over());

    session.start(&mut sink);
    assert!(!session.game_over());
    assert!(!sink.game_over());
    assert_eq!(session.lines(), 0);
    assert_eq!(session.level(), 1);
    assert!(session.active().is_some());

    // Only the fresh block remains on the display.
    let mut painted = 0;
    for y in 1..=GRID_ROWS {
        for x in 1..=GRID_COLS {
            if sink.get(Point::new(x, y)).is_some() {
                painted += 1;
            }
        }
    }
    assert_eq!(painted, 4);
    assert_mirror(&session, &sink);
}

#[test]
fn rotation_of_o_reports_success_without_moving() {
    let (mut session, mut sink) = fixed_session(BlockKind::O);
    let before = session.active().unwrap().squares;
    assert!(session.rotate(RotationDir::Clockwise, &mut sink));
    assert_eq!(session.active().unwrap().squares, before);
}

#[test]
fn moves_with_no_active_block_are_rejected() {
    let mut sink = NullSink;
    let mut session = GameSession::new(5, SpawnPolicy::Random);
    assert!(!session.shift(ShiftDir::Left, &mut sink));
    assert!(!session.rotate(RotationDir::Clockwise, &mut sink));
}
