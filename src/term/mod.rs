//! Terminal module - paint sink, view composition and screen output
//!
//! The game threads paint logical cells into a shared display buffer;
//! the frame loop snapshots that buffer, composes a styled frame, and
//! flushes changed rows to the terminal. Game state never waits on
//! terminal I/O.

pub mod display;
pub mod renderer;
pub mod view;

pub use display::{DisplayGrid, SharedDisplay};
pub use renderer::TerminalScreen;
pub use view::{compose_frame, Frame};
