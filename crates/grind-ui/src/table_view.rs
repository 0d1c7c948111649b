//! Data overview table for the GrindGraph TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with the first filtered
//! days. The sleep column only appears when sleep data was merged.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use grind_core::formatting::{format_number, format_optional, format_steps};
use grind_core::models::{MergedDailyRecord, SLEEP_COLUMN};
use grind_runtime::dashboard::DashboardView;

use crate::themes::Theme;

/// Columns shown for every table.
const BASE_COLUMNS: &[&str] = &[
    "Id",
    "Date",
    "Weekday",
    "TotalSteps",
    "TotalDistance",
    "VeryActiveMinutes",
    "SedentaryMinutes",
    "Calories",
];

/// Header labels for the overview, including the sleep column when present.
pub fn column_headers(has_sleep_column: bool) -> Vec<&'static str> {
    let mut headers = BASE_COLUMNS.to_vec();
    if has_sleep_column {
        headers.push(SLEEP_COLUMN);
    }
    headers
}

/// Cell text for one day, aligned with [`column_headers`].
pub fn row_cells(record: &MergedDailyRecord, has_sleep_column: bool) -> Vec<String> {
    let a = &record.activity;
    let mut cells = vec![
        a.id.clone(),
        a.date.to_string(),
        a.weekday_name().to_string(),
        format_steps(a.total_steps),
        format_number(a.total_distance, 2),
        a.very_active_minutes.to_string(),
        a.sedentary_minutes.to_string(),
        format_steps(u64::from(a.calories)),
    ];
    if has_sleep_column {
        cells.push(format_optional(record.total_minutes_asleep));
    }
    cells
}

/// Display width of each column: the widest of its header and cells.
pub fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let widest_cell = rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.width())
                .max()
                .unwrap_or(0);
            h.width().max(widest_cell) as u16
        })
        .collect()
}

/// Render the overview table into `area`.
pub fn render_overview(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    if view.filtered_rows == 0 {
        render_no_data(frame, area, theme);
        return;
    }

    let headers = column_headers(view.has_sleep_column);
    let cells: Vec<Vec<String>> = view
        .overview
        .iter()
        .map(|record| row_cells(record, view.has_sleep_column))
        .collect();
    let widths: Vec<Constraint> = column_widths(&headers, &cells)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let header = Row::new(
        headers
            .into_iter()
            .map(|h| Cell::from(h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = cells
        .into_iter()
        .enumerate()
        .map(|(i, row)| Row::new(row).style(theme.row_style(i)))
        .collect();

    let title = format!(
        " Data Overview (first {} of {} days) ",
        view.overview.len(),
        view.filtered_rows
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when the filter leaves nothing to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No days match the current filters", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Lower the minimum steps with '-' or widen the date range.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'r' to reset, 'q' to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Data Overview "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
