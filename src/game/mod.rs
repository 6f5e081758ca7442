//! Game core
//!
//! The round-sequence state machine and the engine that drives it.

pub mod engine;
pub mod state;

pub use engine::{GameEngine, GameSnapshot};
pub use state::{AreaSize, GamePhase, GameState, Offset};
