//! Falling-block puzzle engine with a terminal front end.
//!
//! `core` holds the game rules, `engine` wraps a session in a
//! thread-safe driver, `input` maps keys to commands, and `term` paints
//! the shared display buffer onto the screen.

pub mod core;
pub mod engine;
pub mod input;
pub mod term;
pub mod types;
