use crate::themes::Theme;
use grind_core::formatting::format_steps;
use grind_runtime::dashboard::DashboardFilter;
use ratatui::text::{Line, Span};

/// Accent placed either side of the application title.
pub const ACCENT: &str = "⚡";

/// Dashboard header rendering four lines:
///
/// 1. Application title (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. The active filter in `[ start → end | min steps N | shown of total days ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    pub filter: &'a DashboardFilter,
    /// Rows passing the filter.
    pub shown: usize,
    /// Rows in the loaded table.
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(filter: &'a DashboardFilter, shown: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            filter,
            shown,
            total,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" GRINDGRAPH: DAILY ACTIVITY INSIGHTS ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    format!("{} → {}", self.filter.start, self.filter.end),
                    self.theme.value,
                ),
                Span::styled(" | min steps ", self.theme.label),
                Span::styled(format_steps(self.filter.min_steps), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} of {} days", self.shown, self.total),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
