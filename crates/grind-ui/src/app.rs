//! Main application state and TUI event loop for GrindGraph.
//!
//! [`App`] owns the theme, view mode and the active dashboard filter. Each
//! frame it asks the [`DataManager`] for the table (memoized after the first
//! load), rebuilds the [`DashboardView`] for the current filter and draws it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use grind_core::error::Result;
use grind_runtime::dashboard::{DashboardFilter, DashboardView, FilterBounds};
use grind_runtime::data_manager::DataManager;

use crate::dashboard_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Overview table plus all three charts.
    Dashboard,
    /// Overview table only.
    Overview,
}

impl ViewMode {
    /// Parse a `--view` value; anything but `"overview"` is the dashboard.
    pub fn from_name(name: &str) -> Self {
        match name {
            "overview" => Self::Overview,
            _ => Self::Dashboard,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Dashboard => Self::Overview,
            Self::Overview => Self::Dashboard,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the GrindGraph TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Filter applied to the next frame.
    pub filter: DashboardFilter,
    /// Filter restored by `r`.
    initial_filter: DashboardFilter,
    /// Limits the filter keys move within.
    bounds: FilterBounds,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        filter: DashboardFilter,
        bounds: FilterBounds,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            filter,
            initial_filter: filter,
            bounds,
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// on the current thread. The terminal is restored even when a frame
    /// fails.
    pub fn run(mut self, data: &mut DataManager) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, data);

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press to the app state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('+') | KeyCode::Char('=') => self.filter.increase_min_steps(&self.bounds),
            KeyCode::Char('-') | KeyCode::Char('_') => self.filter.decrease_min_steps(),
            KeyCode::Char('[') => self.filter.shift_start(-1, &self.bounds),
            KeyCode::Char(']') => self.filter.shift_start(1, &self.bounds),
            KeyCode::Char('{') => self.filter.shift_end(-1, &self.bounds),
            KeyCode::Char('}') => self.filter.shift_end(1, &self.bounds),
            KeyCode::Char('r') | KeyCode::Char('R') => self.filter = self.initial_filter,
            KeyCode::Tab => self.view_mode = self.view_mode.toggle(),
            _ => return,
        }
        tracing::debug!(
            start = %self.filter.start,
            end = %self.filter.end,
            min_steps = self.filter.min_steps,
            view = ?self.view_mode,
            "filter updated"
        );
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        data: &mut DataManager,
    ) -> Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            let table = data.get_data()?;
            let view = DashboardView::build(table, &self.filter);
            terminal.draw(|frame| self.render(frame, &view))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame, view: &DashboardView) {
        let area = frame.area();
        dashboard_view::render_dashboard(frame, area, view, self.view_mode, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
