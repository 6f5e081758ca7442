//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and application state handling.

pub mod app;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{summary_text, App};
pub use screens::{PlayingScreen, ResultsScreen, StartScreen};
pub use state::{AppState, GameAction, StateManager};
pub use tui::Tui;
