use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::{Advance, GameObserver, GameSession};
use crate::types::{GameCommand, RotationDir, ShiftDir, SpawnPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    LockPoisoned,
}

impl EngineError {
    pub fn code(self) -> &'static str {
        match self {
            EngineError::LockPoisoned => "lock_poisoned",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EngineError::LockPoisoned => "session lock poisoned by a panicked thread",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EngineError {}

/// What one fall tick did, as seen from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or game over; nothing happened.
    Idle,
    Moved,
    Locked { lines_cleared: u32 },
    GameOver,
}

/// Snapshot of the counters the frame loop displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
}

struct Inner {
    session: GameSession,
    sink: Box<dyn GameObserver + Send>,
}

/// Thread-safe handle to one game session and its paint sink.
///
/// Clones share the same session. Every operation takes the lock, runs
/// the session op, and lets it paint through the sink before releasing,
/// so observers never see a half-applied move.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Inner>>,
}

impl SharedSession {
    pub fn new(seed: u32, policy: SpawnPolicy, sink: Box<dyn GameObserver + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: GameSession::new(seed, policy),
                sink,
            })),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, EngineError> {
        self.inner.lock().map_err(|_| EngineError::LockPoisoned)
    }

    /// Apply one player command.
    ///
    /// Gameplay commands are dropped while paused or after game over;
    /// `Start` always restarts and `Pause` toggles while a game is
    /// running. `Quit` is the caller's concern and is a no-op here.
    pub fn dispatch(&self, cmd: GameCommand) -> Result<(), EngineError> {
        let mut inner = self.lock()?;
        let Inner { session, sink } = &mut *inner;

        match cmd {
            GameCommand::Start => session.start(sink.as_mut()),
            GameCommand::Pause => {
                if !session.game_over() {
                    let paused = session.paused();
                    session.set_paused(!paused);
                }
            }
            GameCommand::Quit => {}
            // Releasing soft drop must land even while paused, or the
            // fast interval would stick across the pause.
            GameCommand::SoftDropOff => session.set_soft_drop(false),
            _ if session.paused() || session.game_over() => {}
            GameCommand::ShiftLeft => {
                session.shift(ShiftDir::Left, sink.as_mut());
            }
            GameCommand::ShiftRight => {
                session.shift(ShiftDir::Right, sink.as_mut());
            }
            GameCommand::RotateCw => {
                session.rotate(RotationDir::Clockwise, sink.as_mut());
            }
            GameCommand::RotateCcw => {
                session.rotate(RotationDir::CounterClockwise, sink.as_mut());
            }
            GameCommand::SoftDropOn => session.set_soft_drop(true),
        }
        Ok(())
    }

    /// Run one fall tick unless the session is paused or finished.
    pub fn tick(&self) -> Result<TickOutcome, EngineError> {
        let mut inner = self.lock()?;
        let Inner { session, sink } = &mut *inner;

        if session.paused() || session.game_over() {
            return Ok(TickOutcome::Idle);
        }
        let outcome = match session.advance(sink.as_mut()) {
            Advance::Moved => TickOutcome::Moved,
            Advance::Locked { lines_cleared } => TickOutcome::Locked { lines_cleared },
            Advance::GameOver => TickOutcome::GameOver,
        };
        Ok(outcome)
    }

    /// Delay until the next fall tick.
    pub fn drop_interval(&self) -> Result<Duration, EngineError> {
        let inner = self.lock()?;
        Ok(Duration::from_millis(inner.session.drop_interval_ms()))
    }

    pub fn stats(&self) -> Result<Stats, EngineError> {
        let inner = self.lock()?;
        Ok(Stats {
            lines: inner.session.lines(),
            level: inner.session.level(),
            paused: inner.session.paused(),
            game_over: inner.session.game_over(),
        })
    }

    /// Drive fall ticks until `running` clears or the lock poisons.
    ///
    /// The interval is re-read every sleep slice, so a soft drop press
    /// or a level change mid-wait pulls the pending deadline in instead
    /// of waiting out the old interval.
    pub fn run_timer(&self, running: &AtomicBool) {
        let mut last_tick = Instant::now();
        while running.load(Ordering::Relaxed) {
            let Ok(interval) = self.drop_interval() else {
                return;
            };
            let deadline = last_tick + interval;
            let now = Instant::now();
            if now < deadline {
                thread::sleep((deadline - now).min(Duration::from_millis(10)));
                continue;
            }
            if self.tick().is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }

    /// Run a closure against the locked session, for scenario setup in
    /// tests.
    pub fn with_session<R>(
        &self,
        f: impl FnOnce(&mut GameSession, &mut dyn GameObserver) -> R,
    ) -> Result<R, EngineError> {
        let mut inner = self.lock()?;
        let Inner { session, sink } = &mut *inner;
        Ok(f(session, sink.as_mut()))
    }
}
