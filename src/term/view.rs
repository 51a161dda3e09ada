//! Frame composition: logical display buffer to styled characters.
//!
//! Only the rows below the hidden band are drawn; blocks above the
//! visible window stay off screen until they fall into it.

use crossterm::style::Color;

use crate::engine::Stats;
use crate::term::display::DisplayGrid;
use crate::types::{BlockKind, Point, GRID_COLS, GRID_ROWS, HIDDEN_ROWS};

/// One styled screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub fg: Color,
    pub bold: bool,
}

impl StyledCell {
    fn plain(ch: char) -> Self {
        Self {
            ch,
            fg: Color::Grey,
            bold: false,
        }
    }
}

/// A composed frame, row major. Rows may have different lengths; the
/// renderer pads with spaces.
pub type Frame = Vec<Vec<StyledCell>>;

/// Two screen columns per grid cell keeps the well roughly square in
/// typical terminal fonts.
const CELL_WIDTH: usize = 2;

pub fn color_for(kind: BlockKind) -> Color {
    match kind {
        BlockKind::I => Color::Cyan,
        BlockKind::J => Color::Blue,
        BlockKind::L => Color::DarkYellow,
        BlockKind::O => Color::Yellow,
        BlockKind::S => Color::Green,
        BlockKind::T => Color::Magenta,
        BlockKind::Z => Color::Red,
    }
}

fn push_str(row: &mut Vec<StyledCell>, s: &str) {
    for ch in s.chars() {
        row.push(StyledCell::plain(ch));
    }
}

fn push_styled(row: &mut Vec<StyledCell>, s: &str, fg: Color, bold: bool) {
    for ch in s.chars() {
        row.push(StyledCell { ch, fg, bold });
    }
}

/// Compose the well, its border and the HUD into a frame.
pub fn compose_frame(grid: &DisplayGrid, stats: &Stats) -> Frame {
    let well_width = GRID_COLS as usize * CELL_WIDTH;
    let mut frame: Frame = Vec::new();

    let mut top = Vec::new();
    push_str(&mut top, "+");
    push_str(&mut top, &"-".repeat(well_width));
    push_str(&mut top, "+");
    frame.push(top);

    let first_visible = HIDDEN_ROWS + 1;
    for y in first_visible..=GRID_ROWS {
        let mut row = Vec::new();
        push_str(&mut row, "|");
        for x in 1..=GRID_COLS {
            match grid.get(Point::new(x, y)) {
                Some(kind) => push_styled(&mut row, "[]", color_for(kind), false),
                None => push_str(&mut row, "  "),
            }
        }
        push_str(&mut row, "|");

        let hud = hud_line(y - first_visible, stats, grid);
        if let Some((text, fg, bold)) = hud {
            push_str(&mut row, "  ");
            push_styled(&mut row, text.as_str(), fg, bold);
        }
        frame.push(row);
    }

    let mut bottom = Vec::new();
    push_str(&mut bottom, "+");
    push_str(&mut bottom, &"-".repeat(well_width));
    push_str(&mut bottom, "+");
    frame.push(bottom);

    let mut help = Vec::new();
    push_str(
        &mut help,
        " arrows move  z/x turn  down drop  p pause  s start  q quit",
    );
    frame.push(help);

    frame
}

fn hud_line(slot: i32, stats: &Stats, grid: &DisplayGrid) -> Option<(String, Color, bool)> {
    match slot {
        1 => Some((format!("LINES {:>5}", stats.lines), Color::Grey, false)),
        2 => Some((format!("LEVEL {:>5}", stats.level), Color::Grey, false)),
        4 => match grid.last_clear() {
            Some((_, true)) => Some(("QUAD!".to_string(), Color::Cyan, true)),
            _ => None,
        },
        6 if stats.game_over => Some(("GAME OVER".to_string(), Color::Red, true)),
        6 if stats.paused => Some(("PAUSED".to_string(), Color::Yellow, true)),
        7 if stats.game_over => Some(("press s to restart".to_string(), Color::Grey, false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridSink;

    fn stats() -> Stats {
        Stats {
            lines: 0,
            level: 1,
            paused: false,
            game_over: false,
        }
    }

    #[test]
    fn frame_covers_visible_rows_plus_chrome() {
        let grid = DisplayGrid::new();
        let frame = compose_frame(&grid, &stats());
        // 20 well rows, top and bottom border, help line.
        assert_eq!(frame.len(), (GRID_ROWS - HIDDEN_ROWS) as usize + 3);
    }

    #[test]
    fn hidden_rows_never_reach_the_frame() {
        let mut grid = DisplayGrid::new();
        grid.paint_cell(Point::new(5, 1), Some(BlockKind::I));
        grid.paint_cell(Point::new(5, HIDDEN_ROWS), Some(BlockKind::I));
        let frame = compose_frame(&grid, &stats());
        for row in &frame {
            assert!(row.iter().all(|c| c.fg != Color::Cyan));
        }
    }

    #[test]
    fn painted_cell_lands_at_the_projected_spot() {
        let mut grid = DisplayGrid::new();
        grid.paint_cell(Point::new(1, HIDDEN_ROWS + 1), Some(BlockKind::Z));
        let frame = compose_frame(&grid, &stats());
        // First well row, first cell, just after the border column.
        let row = &frame[1];
        assert_eq!(row[1].ch, '[');
        assert_eq!(row[1].fg, Color::Red);
        assert_eq!(row[2].ch, ']');
    }

    #[test]
    fn game_over_banner_shows() {
        let grid = DisplayGrid::new();
        let mut s = stats();
        s.game_over = true;
        let frame = compose_frame(&grid, &s);
        let text: String = frame
            .iter()
            .flat_map(|row| row.iter().map(|c| c.ch))
            .collect();
        assert!(text.contains("GAME OVER"));
    }
}
