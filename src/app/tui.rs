//! Terminal management system
//!
//! Handles crossterm backend initialization, screen management,
//! and keyboard/mouse event processing for the TUI application.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Input relevant to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    last_tick: Instant,
    tick_rate: Duration,
    active: bool,
}

impl Tui {
    /// Create a new TUI instance with crossterm backend
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            last_tick: Instant::now(),
            tick_rate,
            active: false,
        })
    }

    /// Initialize terminal with proper setup
    pub fn init(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Get terminal size for responsive layout handling
    pub fn size(&self) -> io::Result<ratatui::layout::Rect> {
        self.terminal.size()
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Wait up to the remainder of the current tick for an input event
    pub fn next_event(&mut self) -> io::Result<Option<TuiEvent>> {
        let timeout = poll_timeout(self.tick_rate, self.last_tick.elapsed());

        if event::poll(timeout)? {
            let translated = match event::read()? {
                Event::Key(key) => Some(TuiEvent::Key(key)),
                Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
                Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
                _ => None,
            };
            if translated.is_some() {
                return Ok(translated);
            }
        }

        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }

        Ok(None)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

/// Time left in the current tick
fn poll_timeout(tick_rate: Duration, since_last_tick: Duration) -> Duration {
    tick_rate
        .checked_sub(since_last_tick)
        .unwrap_or(Duration::ZERO)
}
