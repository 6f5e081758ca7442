//! TUI screen components
//!
//! Contains individual screen implementations for the three game phases
//! and the layout they share.

pub mod playing;
pub mod results;
pub mod start;

pub use playing::PlayingScreen;
pub use results::ResultsScreen;
pub use start::StartScreen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Regions of the in-game screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Progress dots across the top
    pub progress: Rect,
    /// Area the target moves in (or the statistics table)
    pub playfield: Rect,
    /// Reset button across the bottom
    pub reset_bar: Rect,
}

impl GameLayout {
    /// Split the terminal area into progress, playfield and reset bar
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress dots
                Constraint::Min(0),    // Playfield
                Constraint::Length(3), // Reset bar
            ])
            .split(area);

        Self {
            progress: chunks[0],
            playfield: chunks[1],
            reset_bar: chunks[2],
        }
    }
}

/// Whether terminal cell (`column`, `row`) lies inside `rect`
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Render the bottom reset button shared by the playing and results screens
pub fn render_reset_bar(f: &mut Frame, area: Rect) {
    let button = Paragraph::new("Reset")
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(button, area);
}
