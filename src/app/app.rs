//! Main application controller
//!
//! Manages the TUI, keeps the screen in step with the game engine, and
//! forwards clicks and keys to engine operations.

use crate::{
    app::{
        screens::{rect_contains, GameLayout, PlayingScreen, ResultsScreen, StartScreen},
        state::{AppState, GameAction, StateManager},
        tui::{Tui, TuiEvent},
    },
    config::GameConfig,
    game::{AreaSize, GameEngine, GameSnapshot},
    Result,
};
use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use std::io;
use tokio::sync::watch;
use tracing::{debug, info};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Screen selection derived from the game phase
    state_manager: StateManager,
    /// Game core
    engine: GameEngine,
    /// Snapshot feed from the engine
    snapshot_rx: watch::Receiver<GameSnapshot>,
    /// Terminal area at the last frame
    area: Rect,
    /// Screen components
    start_screen: StartScreen,
    playing_screen: PlayingScreen,
    results_screen: ResultsScreen,
    /// Most recent finished sequence, kept for the exit summary
    last_completed: Option<GameSnapshot>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let tui = Tui::new(config.tick_rate)?;
        let engine = GameEngine::new(config);
        let snapshot_rx = engine.subscribe();

        Ok(Self {
            tui,
            state_manager: StateManager::new(),
            engine,
            snapshot_rx,
            area: Rect::default(),
            start_screen: StartScreen::new(),
            playing_screen: PlayingScreen::new(),
            results_screen: ResultsScreen::new(),
            last_completed: None,
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        self.sync_area()?;
        Ok(())
    }

    /// Restore the terminal
    pub fn shutdown(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }

    /// The last completed round sequence, if any
    pub fn last_completed(&self) -> Option<&GameSnapshot> {
        self.last_completed.as_ref()
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            self.sync_area()?;
            self.engine.resize(playable_area_for(self.area)).await;

            let snapshot = self.snapshot_rx.borrow_and_update().clone();
            if snapshot.is_complete() {
                self.last_completed = Some(snapshot.clone());
            }
            if self.state_manager.sync_with(snapshot.phase) {
                debug!(screen = ?self.state_manager.current_state(), "screen changed");
            }

            self.draw(&snapshot)?;
            self.handle_events(&snapshot).await;
        }
        info!("quitting");
        Ok(())
    }

    fn layout(&self) -> GameLayout {
        GameLayout::new(self.area)
    }

    fn sync_area(&mut self) -> io::Result<()> {
        self.area = self.tui.size()?;
        Ok(())
    }

    /// Draw the current screen
    fn draw(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        let state = self.state_manager.current_state();
        let start_screen = &self.start_screen;
        let playing_screen = &self.playing_screen;
        let results_screen = &self.results_screen;

        self.tui.draw(|f| match state {
            AppState::Start => start_screen.render(f),
            AppState::Playing => playing_screen.render(f, snapshot),
            AppState::Results => results_screen.render(f, snapshot),
        })
    }

    /// Handle keyboard and mouse events
    async fn handle_events(&mut self, snapshot: &GameSnapshot) {
        let event = match self.tui.next_event() {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => {
                debug!(error = %e, "event poll failed");
                return;
            }
        };

        match event {
            TuiEvent::Key(key) => {
                let action = StateManager::key_to_action(key);
                self.handle_action(action).await;
            }
            TuiEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    self.handle_click(snapshot, mouse.column, mouse.row).await;
                }
            }
            TuiEvent::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.area = Rect::new(0, 0, width, height);
                self.engine.resize(playable_area_for(self.area)).await;
            }
        }
    }

    async fn handle_action(&mut self, action: GameAction) {
        match (self.state_manager.current_state(), action) {
            (_, GameAction::Quit) => self.state_manager.quit(),
            (_, GameAction::Reset) => self.engine.reset().await,
            (AppState::Start, GameAction::Select) => self.engine.start().await,
            (AppState::Playing, GameAction::Select) => self.tap().await,
            _ => {}
        }
    }

    async fn handle_click(&mut self, snapshot: &GameSnapshot, column: u16, row: u16) {
        let layout = self.layout();
        match self.state_manager.current_state() {
            AppState::Start => {
                if StartScreen::hit_test(self.area, column, row) {
                    self.engine.start().await;
                }
            }
            AppState::Playing => {
                if PlayingScreen::hit_test(layout.playfield, snapshot, column, row) {
                    self.tap().await;
                } else if rect_contains(layout.reset_bar, column, row) {
                    self.engine.reset().await;
                }
            }
            AppState::Results => {
                if rect_contains(layout.reset_bar, column, row) {
                    self.engine.reset().await;
                }
            }
        }
    }

    async fn tap(&mut self) {
        self.engine.record_tap(playable_area_for(self.area)).await;
    }
}

/// Playable area in layout units for a terminal of the given size
fn playable_area_for(terminal: Rect) -> AreaSize {
    PlayingScreen::playable_area(GameLayout::new(terminal).playfield)
}

/// Plain-text summary of a finished sequence for printing after exit
pub fn summary_text(snapshot: &GameSnapshot) -> String {
    ResultsScreen::stat_lines(snapshot)
        .into_iter()
        .map(|line| {
            let marker = if line.emphasized && !line.is_average { " *" } else { "" };
            format!("{:<10}{}{}", line.label, line.value, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GamePhase, Offset};
    use std::time::Duration;

    #[test]
    fn test_playable_area_tracks_terminal_size() {
        // 6 rows go to the progress and reset bars
        assert_eq!(playable_area_for(Rect::new(0, 0, 80, 24)), AreaSize::new(1_280.0, 576.0));
        assert_eq!(playable_area_for(Rect::new(0, 0, 20, 12)), AreaSize::new(320.0, 192.0));
    }

    #[test]
    fn test_summary_text() {
        let snapshot = GameSnapshot {
            phase: GamePhase::Complete,
            round_index: 2,
            total_rounds: 2,
            latencies: vec![Duration::from_millis(300), Duration::from_millis(100)],
            target: Offset::default(),
            target_diameter: 96.0,
            relocate_pending: false,
        };

        let text = summary_text(&snapshot);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Tap 1     Time: 300 ms");
        assert_eq!(lines[1], "Tap 2     Time: 100 ms *");
        assert_eq!(lines[2], "Average   Time: 200 ms");
    }
}
