//! Application state management
//!
//! Maps the engine's game phase onto screens and translates keyboard
//! events into game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::game::GamePhase;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Centred start button
    #[default]
    Start,
    /// Progress dots, moving target and reset bar
    Playing,
    /// Per-tap latencies, average and reset bar
    Results,
}

impl From<GamePhase> for AppState {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle => AppState::Start,
            GamePhase::Active => AppState::Playing,
            GamePhase::Complete => AppState::Results,
        }
    }
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start the game or tap the target (Enter, Space)
    Select,
    /// Abandon the sequence and return to the start screen (r, Esc)
    Reset,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug, Default)]
pub struct StateManager {
    current_state: AppState,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the start screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Follow the engine's phase; returns true when the screen changed
    pub fn sync_with(&mut self, phase: GamePhase) -> bool {
        let next = AppState::from(phase);
        if next == self.current_state {
            return false;
        }
        self.current_state = next;
        true
    }

    /// Convert keyboard event to a game action
    pub fn key_to_action(key: KeyEvent) -> GameAction {
        if key.kind == KeyEventKind::Release {
            return GameAction::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => GameAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                GameAction::Quit
            }

            KeyCode::Enter | KeyCode::Char(' ') => GameAction::Select,

            KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('R') => GameAction::Reset,

            _ => GameAction::None,
        }
    }
}
