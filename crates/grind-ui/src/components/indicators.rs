use crate::themes::Theme;
use ratatui::text::{Line, Span};

// ── SleepErrorBanner ─────────────────────────────────────────────────────────

/// Red banner shown while the dashboard runs without sleep data.
///
/// Format: `"FATAL ERROR: Sleep file not found. Check path: <reason>"`
pub struct SleepErrorBanner<'a> {
    /// Why the sleep export could not be loaded, usually the missing path.
    pub reason: &'a str,
    pub theme: &'a Theme,
}

impl<'a> SleepErrorBanner<'a> {
    pub fn new(reason: &'a str, theme: &'a Theme) -> Self {
        Self { reason, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(
                " FATAL ERROR: Sleep file not found. Check path: ",
                self.theme.error_banner,
            ),
            Span::styled(format!("{} ", self.reason), self.theme.error_banner),
        ])
    }
}

// ── KeyHints ─────────────────────────────────────────────────────────────────

/// Footer listing the active key bindings.
pub struct KeyHints<'a> {
    pub theme: &'a Theme,
}

/// (key, action) pairs in display order.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("+/-", "min steps"),
    ("[ ]", "start date"),
    ("{ }", "end date"),
    ("r", "reset"),
    ("Tab", "view"),
    ("q", "quit"),
];

impl<'a> KeyHints<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Format: `"+/- min steps · [ ] start date · ... · q quit"`
    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(KEY_BINDINGS.len() * 3);
        for (i, (key, action)) in KEY_BINDINGS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", self.theme.dim));
            }
            spans.push(Span::styled(*key, self.theme.info));
            spans.push(Span::styled(format!(" {action}"), self.theme.dim));
        }
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
