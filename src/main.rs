//! Terminal runner (default binary).
//!
//! The fall timer runs on its own thread and the main thread handles
//! input and rendering; both go through the shared session driver, so
//! every mutation and its paint calls happen under one lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockdrop::engine::SharedSession;
use blockdrop::input::InputHandler;
use blockdrop::term::{compose_frame, SharedDisplay, TerminalScreen};
use blockdrop::types::{GameCommand, SpawnPolicy};

const FRAME_MS: u64 = 33;

fn main() -> Result<()> {
    let mut screen = TerminalScreen::new();
    screen.enter()?;

    let result = run(&mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn run(screen: &mut TerminalScreen) -> Result<()> {
    let display = SharedDisplay::new();
    let session = SharedSession::new(
        seed_from_clock(),
        SpawnPolicy::Random,
        Box::new(display.clone()),
    );
    session.dispatch(GameCommand::Start)?;

    let running = Arc::new(AtomicBool::new(true));
    let ticker = {
        let session = session.clone();
        let running = Arc::clone(&running);
        thread::spawn(move || session.run_timer(&running))
    };

    let mut input = InputHandler::new();
    let result = event_loop(screen, &session, &display, &mut input);

    running.store(false, Ordering::Relaxed);
    let _ = ticker.join();
    result
}

fn event_loop(
    screen: &mut TerminalScreen,
    session: &SharedSession,
    display: &SharedDisplay,
    input: &mut InputHandler,
) -> Result<()> {
    loop {
        let stats = session.stats()?;
        let frame = compose_frame(&display.snapshot(), &stats);
        screen.draw(&frame)?;

        if let Some(cmd) = input.check_release() {
            session.dispatch(cmd)?;
        }

        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(cmd) = input.handle_key_press(key.code) {
                        if cmd == GameCommand::Quit {
                            return Ok(());
                        }
                        session.dispatch(cmd)?;
                    }
                }
                Event::Resize(_, _) => screen.invalidate(),
                _ => {}
            }
        }
    }
}

fn seed_from_clock() -> u32 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.subsec_nanos() ^ (elapsed.as_secs() as u32),
        Err(_) => 0x5eed_b10c,
    }
}
