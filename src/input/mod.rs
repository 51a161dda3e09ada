//! Input module - terminal keys to game commands

pub mod handler;

pub use handler::InputHandler;
