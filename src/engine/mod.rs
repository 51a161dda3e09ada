//! Engine module - the concurrency boundary around a game session
//!
//! Input handling and the fall timer run on different threads; both go
//! through [`SharedSession`], which serializes every state mutation and
//! its paint calls under one lock.

pub mod driver;

pub use driver::{EngineError, SharedSession, Stats, TickOutcome};
