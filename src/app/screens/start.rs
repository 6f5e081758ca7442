//! Start screen implementation
//!
//! A single round "Start" button centred in the terminal.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use crate::app::screens::rect_contains;

const BUTTON_WIDTH: u16 = 12;
const BUTTON_HEIGHT: u16 = 5;

/// Start screen component
#[derive(Debug, Default)]
pub struct StartScreen;

impl StartScreen {
    /// Create a new start screen
    pub fn new() -> Self {
        Self
    }

    /// Rectangle of the start button, centred in `area`
    pub fn button_rect(area: Rect) -> Rect {
        let width = BUTTON_WIDTH.min(area.width);
        let height = BUTTON_HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    /// Whether a click at (`column`, `row`) lands on the start button
    pub fn hit_test(area: Rect, column: u16, row: u16) -> bool {
        rect_contains(Self::button_rect(area), column, row)
    }

    /// Render the start screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();
        let button_area = Self::button_rect(size);

        let label = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Start",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ];

        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().bg(Color::Magenta))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Magenta)),
            );
        f.render_widget(button, button_area);

        if size.height > button_area.bottom() + 1 {
            let help = Paragraph::new("Click or press Enter to start, Q to quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(
                help,
                Rect::new(size.x, button_area.bottom() + 1, size.width, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_is_centred() {
        let rect = StartScreen::button_rect(Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(34, 9, 12, 5));
    }

    #[test]
    fn test_button_shrinks_in_tiny_terminal() {
        let rect = StartScreen::button_rect(Rect::new(0, 0, 8, 3));
        assert_eq!(rect, Rect::new(0, 0, 8, 3));
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(0, 0, 80, 24);
        assert!(StartScreen::hit_test(area, 34, 9));
        assert!(StartScreen::hit_test(area, 45, 13));
        assert!(!StartScreen::hit_test(area, 46, 13));
        assert!(!StartScreen::hit_test(area, 0, 0));
    }
}
