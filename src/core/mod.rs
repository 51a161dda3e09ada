//! Core module - pure game logic with no external I/O
//!
//! Field, block geometry, rotation tables, spawning and the session
//! state machine. Painting goes through the observer traits; nothing
//! in here touches the terminal or threads.

pub mod block;
pub mod field;
pub mod observer;
pub mod rng;
pub mod rotation;
pub mod session;
pub mod spawn;

// Re-export commonly used types
pub use block::Block;
pub use field::Field;
pub use observer::{GameObserver, GridSink, NullSink};
pub use rng::SimpleRng;
pub use rotation::{rotate, rule_for};
pub use session::{Advance, GameSession};
pub use spawn::{spawn_block, Spawner};
