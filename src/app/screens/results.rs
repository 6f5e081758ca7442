//! Results screen implementation
//!
//! Lists every tap latency with the fastest one highlighted, followed by
//! the average.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table},
    Frame,
};
use crate::app::screens::{playing::render_progress, render_reset_bar, GameLayout};
use crate::game::GameSnapshot;
use crate::util::units::format_latency;

/// One line of the statistics table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: String,
    pub value: String,
    /// Rendered bold: the fastest tap, and the average
    pub emphasized: bool,
    pub is_average: bool,
}

/// Results screen component that displays the finished sequence
#[derive(Debug, Default)]
pub struct ResultsScreen;

impl ResultsScreen {
    /// Create a new results screen
    pub fn new() -> Self {
        Self
    }

    /// Build the statistics lines for a snapshot
    pub fn stat_lines(snapshot: &GameSnapshot) -> Vec<StatLine> {
        let fastest = snapshot.min_latency();

        let mut lines: Vec<StatLine> = snapshot
            .latencies
            .iter()
            .enumerate()
            .map(|(index, latency)| StatLine {
                label: format!("Tap {}", index + 1),
                value: format!("Time: {}", format_latency(*latency)),
                emphasized: Some(*latency) == fastest,
                is_average: false,
            })
            .collect();

        lines.push(StatLine {
            label: "Average".to_string(),
            value: format!("Time: {}", format_latency(snapshot.average_latency())),
            emphasized: true,
            is_average: true,
        });

        lines
    }

    /// Render the results screen
    pub fn render(&self, f: &mut Frame, snapshot: &GameSnapshot) {
        let layout = GameLayout::new(f.size());

        render_progress(f, layout.progress, snapshot);
        self.render_statistics(f, layout.playfield, snapshot);
        render_reset_bar(f, layout.reset_bar);
    }

    fn render_statistics(&self, f: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
        let lines = Self::stat_lines(snapshot);
        let table_height = lines.len() as u16 + 2;

        let table_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(table_height),
                Constraint::Min(0),
            ])
            .split(area)[1];

        let rows: Vec<Row> = lines
            .into_iter()
            .map(|line| {
                let mut style = Style::default();
                if line.emphasized {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if line.is_average {
                    style = style.bg(Color::DarkGray);
                }
                Row::new(vec![line.label, line.value]).style(style)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(16)])
            .block(
                Block::default()
                    .title("Results")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .column_spacing(2);

        f.render_widget(table, table_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GamePhase, Offset};
    use std::time::Duration;

    fn finished(latencies_ms: &[u64]) -> GameSnapshot {
        GameSnapshot {
            phase: GamePhase::Complete,
            round_index: latencies_ms.len(),
            total_rounds: 5,
            latencies: latencies_ms.iter().map(|ms| Duration::from_millis(*ms)).collect(),
            target: Offset::default(),
            target_diameter: 96.0,
            relocate_pending: false,
        }
    }

    #[test]
    fn test_stat_lines() {
        let lines = ResultsScreen::stat_lines(&finished(&[120, 80, 200, 80, 150]));
        assert_eq!(lines.len(), 6);

        assert_eq!(lines[0].label, "Tap 1");
        assert_eq!(lines[0].value, "Time: 120 ms");
        assert!(!lines[0].emphasized);

        // Every tap equal to the minimum is highlighted
        assert!(lines[1].emphasized);
        assert!(lines[3].emphasized);
        assert!(!lines[2].emphasized);

        let average = &lines[5];
        assert_eq!(average.label, "Average");
        assert_eq!(average.value, "Time: 126 ms");
        assert!(average.is_average);
    }

    #[test]
    fn test_stat_lines_empty() {
        let lines = ResultsScreen::stat_lines(&finished(&[]));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].value, "Time: 0 ms");
    }
}
