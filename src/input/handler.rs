//! Key mapping for terminal environments.
//!
//! Most terminals never emit key release events, so holding Down is
//! modelled with a timeout: each Down press refreshes a latch, and the
//! latch expiring stands in for the release.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::types::{GameCommand, SOFT_DROP_GRACE_MS};

/// Maps key presses to commands and tracks the soft drop latch.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    last_down_time: Instant,
    release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_release_timeout(Duration::from_millis(SOFT_DROP_GRACE_MS))
    }

    pub fn with_release_timeout(release_timeout: Duration) -> Self {
        Self {
            soft_drop_held: false,
            last_down_time: Instant::now(),
            release_timeout,
        }
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameCommand> {
        match code {
            KeyCode::Left => Some(GameCommand::ShiftLeft),
            KeyCode::Right => Some(GameCommand::ShiftRight),
            KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameCommand::RotateCw),
            KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameCommand::RotateCcw),
            KeyCode::Down => {
                self.last_down_time = Instant::now();
                if self.soft_drop_held {
                    None
                } else {
                    self.soft_drop_held = true;
                    Some(GameCommand::SoftDropOn)
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::Pause),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => Some(GameCommand::Start),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameCommand::Quit),
            _ => None,
        }
    }

    /// Expire the soft drop latch once no Down press has arrived within
    /// the timeout. Call this every loop iteration.
    pub fn check_release(&mut self) -> Option<GameCommand> {
        if self.soft_drop_held && self.last_down_time.elapsed() >= self.release_timeout {
            self.soft_drop_held = false;
            Some(GameCommand::SoftDropOff)
        } else {
            None
        }
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_shifts() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_press(KeyCode::Left),
            Some(GameCommand::ShiftLeft)
        );
        assert_eq!(
            handler.handle_key_press(KeyCode::Right),
            Some(GameCommand::ShiftRight)
        );
    }

    #[test]
    fn repeated_down_emits_soft_drop_once() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_press(KeyCode::Down),
            Some(GameCommand::SoftDropOn)
        );
        assert_eq!(handler.handle_key_press(KeyCode::Down), None);
        assert!(handler.soft_drop_held());
    }

    #[test]
    fn latch_expires_into_soft_drop_off() {
        let mut handler = InputHandler::with_release_timeout(Duration::from_millis(0));
        handler.handle_key_press(KeyCode::Down);
        assert_eq!(handler.check_release(), Some(GameCommand::SoftDropOff));
        assert!(!handler.soft_drop_held());
        assert_eq!(handler.check_release(), None);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.handle_key_press(KeyCode::Char('m')), None);
        assert_eq!(handler.handle_key_press(KeyCode::Home), None);
    }
}
