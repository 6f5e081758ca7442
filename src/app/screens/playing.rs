//! Playing screen implementation
//!
//! Shows round progress as a row of dots, the moving target inside the
//! playfield, and the reset bar.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use crate::app::screens::{rect_contains, render_reset_bar, GameLayout};
use crate::game::{AreaSize, GameSnapshot};
use crate::util::units::{columns_to_units, rows_to_units, units_to_columns, units_to_rows};

/// Playing screen component
#[derive(Debug, Default)]
pub struct PlayingScreen;

/// Progress dot state for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Done,
    Current,
    Pending,
}

impl DotState {
    fn color(self) -> Color {
        match self {
            DotState::Done => Color::Green,
            DotState::Current => Color::Yellow,
            DotState::Pending => Color::Gray,
        }
    }
}

impl PlayingScreen {
    /// Create a new playing screen
    pub fn new() -> Self {
        Self
    }

    /// Size of the playfield in layout units
    pub fn playable_area(playfield: Rect) -> AreaSize {
        AreaSize::new(columns_to_units(playfield.width), rows_to_units(playfield.height))
    }

    /// Terminal rectangle covered by the target, clipped to the playfield
    pub fn target_rect(playfield: Rect, snapshot: &GameSnapshot) -> Rect {
        let width = units_to_columns(snapshot.target_diameter).max(1);
        let height = units_to_rows(snapshot.target_diameter).max(1);
        let rect = Rect::new(
            playfield.x.saturating_add(units_to_columns(snapshot.target.x)),
            playfield.y.saturating_add(units_to_rows(snapshot.target.y)),
            width,
            height,
        );
        rect.intersection(playfield)
    }

    /// Whether a click at (`column`, `row`) lands on the target
    pub fn hit_test(playfield: Rect, snapshot: &GameSnapshot, column: u16, row: u16) -> bool {
        rect_contains(Self::target_rect(playfield, snapshot), column, row)
    }

    /// State of each progress dot
    pub fn dots(snapshot: &GameSnapshot) -> Vec<DotState> {
        (0..snapshot.total_rounds)
            .map(|index| {
                if index < snapshot.round_index {
                    DotState::Done
                } else if index == snapshot.round_index {
                    DotState::Current
                } else {
                    DotState::Pending
                }
            })
            .collect()
    }

    /// Render the playing screen
    pub fn render(&self, f: &mut Frame, snapshot: &GameSnapshot) {
        let layout = GameLayout::new(f.size());

        render_progress(f, layout.progress, snapshot);
        self.render_target(f, layout.playfield, snapshot);
        render_reset_bar(f, layout.reset_bar);
    }

    fn render_target(&self, f: &mut Frame, playfield: Rect, snapshot: &GameSnapshot) {
        let area = Self::target_rect(playfield, snapshot);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let target = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Magenta));

        f.render_widget(target, area);
    }
}

/// Render the row of progress dots
pub fn render_progress(f: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let spans: Vec<Span> = PlayingScreen::dots(snapshot)
        .into_iter()
        .flat_map(|dot| {
            [
                Span::styled("●", Style::default().fg(dot.color())),
                Span::raw(" "),
            ]
        })
        .collect();

    let progress = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(progress, area);
}
