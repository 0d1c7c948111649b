//! The three dashboard charts.
//!
//! 1. Steps vs. calories, one scatter series per [`IntensityBand`].
//! 2. Average steps per weekday as a bar chart.
//! 3. Minutes asleep vs. steps, or the empty-result warning.

use ratatui::{
    layout::Rect,
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use grind_core::formatting::format_number;
use grind_core::time_utils::weekday_short_name;
use grind_runtime::dashboard::{ActivityPoint, SleepPoint, SleepView, WeekdayAverage};

use crate::themes::{IntensityBand, Theme};

pub const STEPS_CALORIES_TITLE: &str = " 1. Steps vs. Calories Burned: Activity Intensity ";
pub const WEEKDAY_TITLE: &str = " 2. Average Steps by Day of Week: Habit Analysis ";
pub const SLEEP_TITLE: &str = " 3. Sleep vs. Activity Correlation ";

// ── Series helpers ────────────────────────────────────────────────────────────

/// (steps, calories) pairs split by very-active band, in [`IntensityBand::ALL`]
/// order.
pub fn intensity_series(points: &[ActivityPoint]) -> [Vec<(f64, f64)>; 3] {
    let mut series: [Vec<(f64, f64)>; 3] = Default::default();
    for p in points {
        let slot = match IntensityBand::of(p.very_active_minutes) {
            IntensityBand::Low => 0,
            IntensityBand::Medium => 1,
            IntensityBand::High => 2,
        };
        series[slot].push((p.steps as f64, f64::from(p.calories)));
    }
    series
}

/// (minutes asleep, steps) pairs.
pub fn sleep_series(points: &[SleepPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.minutes_asleep as f64, p.steps as f64))
        .collect()
}

/// Bar labels and rounded averages, Monday first.
pub fn weekday_bars(averages: &[WeekdayAverage]) -> Vec<(&'static str, u64)> {
    averages
        .iter()
        .map(|a| (weekday_short_name(a.weekday), a.average_steps.round() as u64))
        .collect()
}

/// `[0, max + 5%]`, or `[0, 1]` when there is nothing positive to show.
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        [0.0, max * 1.05]
    } else {
        [0.0, 1.0]
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Line<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|v| Line::from(format_number(v, 0)))
        .collect()
}

// ── Renderers ─────────────────────────────────────────────────────────────────

pub fn render_steps_vs_calories(
    frame: &mut Frame,
    area: Rect,
    points: &[ActivityPoint],
    theme: &Theme,
) {
    let series = intensity_series(points);
    let datasets: Vec<Dataset> = IntensityBand::ALL
        .iter()
        .zip(series.iter())
        .map(|(band, data)| {
            Dataset::default()
                .name(band.label())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(theme.intensity_style(*band))
                .data(data)
        })
        .collect();

    let x_bounds = axis_bounds(points.iter().map(|p| p.steps as f64));
    let y_bounds = axis_bounds(points.iter().map(|p| f64::from(p.calories)));

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(STEPS_CALORIES_TITLE, theme.chart_title)),
        )
        .x_axis(
            Axis::default()
                .title("TotalSteps")
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Calories")
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

pub fn render_weekday_bars(
    frame: &mut Frame,
    area: Rect,
    averages: &[WeekdayAverage],
    theme: &Theme,
) {
    let bars = weekday_bars(averages);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(WEEKDAY_TITLE, theme.chart_title)),
        )
        .data(&bars[..])
        .bar_width(7)
        .bar_gap(2)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.label);

    frame.render_widget(chart, area);
}

pub fn render_sleep_correlation(frame: &mut Frame, area: Rect, sleep: &SleepView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(SLEEP_TITLE, theme.chart_title));

    let points = match sleep {
        SleepView::Points(points) => points,
        SleepView::Unavailable(warning) => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(warning.to_string(), theme.warning)),
            ];
            frame.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
                area,
            );
            return;
        }
    };

    let data = sleep_series(points);
    let x_bounds = axis_bounds(data.iter().map(|(x, _)| *x));
    let y_bounds = axis_bounds(data.iter().map(|(_, y)| *y));

    let dataset = Dataset::default()
        .name("days with sleep")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(theme.sleep_point)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("Total Minutes Asleep")
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Total Steps")
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
