//! Flushes composed frames to the terminal.
//!
//! Full redraws would flicker at soft drop speeds, so the screen keeps
//! the previous frame and rewrites only rows that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::view::Frame;

pub struct TerminalScreen {
    stdout: io::Stdout,
    last: Option<Frame>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to rewrite every row; use after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let unchanged = |y: usize| {
            self.last
                .as_ref()
                .and_then(|last| last.get(y))
                .is_some_and(|row| Some(row) == frame.get(y))
        };

        let mut dirty = Vec::new();
        for y in 0..frame.len() {
            if !unchanged(y) {
                dirty.push(y);
            }
        }
        // A shrinking frame leaves stale rows behind; clear them.
        let stale_rows = self.last.as_ref().map_or(0, Vec::len);

        for y in dirty {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
            let mut current: Option<(Color, bool)> = None;
            for cell in &frame[y] {
                if current != Some((cell.fg, cell.bold)) {
                    self.stdout.queue(SetForegroundColor(cell.fg))?;
                    self.stdout.queue(SetAttribute(if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    current = Some((cell.fg, cell.bold));
                }
                self.stdout.queue(Print(cell.ch))?;
            }
            self.stdout.queue(ResetColor)?;
            self.stdout.queue(SetAttribute(Attribute::Reset))?;
        }

        for y in frame.len()..stale_rows {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        }

        self.stdout.flush()?;
        self.last = Some(frame.clone());
        Ok(())
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}
