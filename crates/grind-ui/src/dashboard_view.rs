//! Full-screen composition of the dashboard.
//!
//! Stacks the header, the optional sleep error banner, the overview table,
//! the charts (dashboard mode only) and the key-binding footer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Text,
    widgets::Paragraph,
    Frame,
};

use grind_runtime::dashboard::{DashboardView, OVERVIEW_ROWS};

use crate::app::ViewMode;
use crate::charts;
use crate::components::{Header, KeyHints, SleepErrorBanner};
use crate::table_view;
use crate::themes::Theme;

const HEADER_HEIGHT: u16 = 4;
/// Overview rows plus the header row and two borders.
const TABLE_HEIGHT: u16 = OVERVIEW_ROWS as u16 + 3;

/// Render `view` into `area` in the given mode.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    mode: ViewMode,
    theme: &Theme,
) {
    let banner_height = if view.sleep_error.is_some() { 1 } else { 0 };
    let body = match mode {
        ViewMode::Dashboard => Constraint::Length(TABLE_HEIGHT),
        ViewMode::Overview => Constraint::Min(TABLE_HEIGHT),
    };
    let charts = match mode {
        ViewMode::Dashboard => Constraint::Min(10),
        ViewMode::Overview => Constraint::Length(0),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(banner_height),
            body,
            charts,
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(&view.filter, view.filtered_rows, view.total_rows, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    if let Some(reason) = &view.sleep_error {
        let banner = SleepErrorBanner::new(reason, theme);
        frame.render_widget(Paragraph::new(banner.to_line()), chunks[1]);
    }

    table_view::render_overview(frame, chunks[2], view, theme);

    if mode == ViewMode::Dashboard {
        render_charts(frame, chunks[3], view, theme);
    }

    frame.render_widget(Paragraph::new(KeyHints::new(theme).to_line()), chunks[4]);
}

fn render_charts(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    charts::render_steps_vs_calories(frame, top[0], &view.activity, theme);
    charts::render_weekday_bars(frame, top[1], &view.weekday_averages, theme);
    charts::render_sleep_correlation(frame, rows[1], &view.sleep, theme);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use grind_core::models::{
        ActivityRecord, DailyTable, LoadMetadata, MergedDailyRecord, SleepStatus,
    };
    use grind_runtime::dashboard::DashboardFilter;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn record(day: u32, steps: u64, sleep: Option<i64>) -> MergedDailyRecord {
        let date = NaiveDate::from_ymd_opt(2016, 4, day).unwrap();
        MergedDailyRecord {
            activity: ActivityRecord {
                id: "4020332650".to_string(),
                date,
                weekday: date.weekday(),
                total_steps: steps,
                total_distance: steps as f64 / 1400.0,
                tracker_distance: None,
                logged_activities_distance: None,
                very_active_distance: None,
                moderately_active_distance: None,
                light_active_distance: None,
                sedentary_active_distance: None,
                very_active_minutes: (steps / 400) as u32,
                fairly_active_minutes: 10,
                lightly_active_minutes: 200,
                sedentary_minutes: 900,
                calories: 1800 + (steps / 20) as u32,
            },
            total_minutes_asleep: sleep,
        }
    }

    fn view(sleep: SleepStatus) -> DashboardView {
        let table = DailyTable {
            rows: vec![
                record(12, 8000, Some(400)),
                record(13, 11000, None),
                record(14, 6200, Some(450)),
            ],
            sleep,
            metadata: LoadMetadata::default(),
        };
        DashboardView::build(&table, &DashboardFilter::for_table(&table))
    }

    fn draw(view: &DashboardView, mode: ViewMode) -> String {
        let mut terminal = Terminal::new(TestBackend::new(150, 50)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard(frame, area, view, mode, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_dashboard_mode_shows_every_section() {
        let text = draw(&view(SleepStatus::Merged), ViewMode::Dashboard);
        assert!(text.contains("GRINDGRAPH: DAILY ACTIVITY INSIGHTS"));
        assert!(text.contains("Data Overview"));
        assert!(text.contains("Steps vs. Calories"));
        assert!(text.contains("Average Steps by Day of Week"));
        assert!(text.contains("Sleep vs. Activity Correlation"));
        assert!(!text.contains("FATAL ERROR"));
    }

    #[test]
    fn test_overview_mode_hides_charts() {
        let text = draw(&view(SleepStatus::Merged), ViewMode::Overview);
        assert!(text.contains("Data Overview"));
        assert!(!text.contains("Steps vs. Calories"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_missing_sleep_shows_banner_and_warning() {
        let text = draw(
            &view(SleepStatus::Unavailable {
                reason: "Data file not found: p2/minuteSleep_merged.csv".to_string(),
            }),
            ViewMode::Dashboard,
        );
        assert!(text.contains("FATAL ERROR: Sleep file not found"));
        assert!(text.contains("p2/minuteSleep_merged.csv"));
        assert!(text.contains("Sleep data not available for the current filters."));
    }
}
