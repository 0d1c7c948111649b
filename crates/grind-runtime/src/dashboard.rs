//! Filters and chart series behind the dashboard.
//!
//! Everything here is a pure function of a [`DailyTable`] and a
//! [`DashboardFilter`]; the UI layer only renders what [`DashboardView`]
//! hands it.

use chrono::{NaiveDate, Weekday};
use grind_core::error::{GrindError, Result};
use grind_core::models::{DailyTable, MergedDailyRecord};
use grind_core::settings::DEFAULT_MIN_STEPS;
use grind_core::time_utils::{weekday_index, WEEKDAY_ORDER};

/// Amount the minimum-steps filter moves per key press.
pub const STEP_INCREMENT: u64 = 500;

/// Number of filtered rows shown in the data overview.
pub const OVERVIEW_ROWS: usize = 5;

/// Shown in place of the sleep chart when there is nothing to plot.
pub const EMPTY_SLEEP_WARNING: &str =
    "Sleep data not available for the current filters. Try widening the date range.";

// ── Filter ────────────────────────────────────────────────────────────────────

/// Range the filter controls may move within, taken from the loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterBounds {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub max_steps: u64,
}

impl FilterBounds {
    /// Bounds of `table`; an empty table allows any date and no step filter.
    pub fn of(table: &DailyTable) -> Self {
        let (first_date, last_date) = table
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self {
            first_date,
            last_date,
            max_steps: table.max_steps(),
        }
    }
}

/// Row predicate: an inclusive date range and a minimum step count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min_steps: u64,
}

impl DashboardFilter {
    /// Build a filter, rejecting a start date after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate, min_steps: u64) -> Result<Self> {
        if start > end {
            return Err(GrindError::InvalidDateRange { start, end });
        }
        Ok(Self {
            start,
            end,
            min_steps,
        })
    }

    /// The startup filter: every date in the table and the default minimum
    /// steps, clamped to the largest value present.
    pub fn for_table(table: &DailyTable) -> Self {
        let bounds = FilterBounds::of(table);
        Self {
            start: bounds.first_date,
            end: bounds.last_date,
            min_steps: DEFAULT_MIN_STEPS.min(bounds.max_steps),
        }
    }

    /// Startup filter with command-line overrides applied.
    ///
    /// Missing dates fall back to the table's range and `min_steps` is
    /// clamped to the table's maximum.
    pub fn with_overrides(
        table: &DailyTable,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        min_steps: u64,
    ) -> Result<Self> {
        let bounds = FilterBounds::of(table);
        Self::new(
            start.unwrap_or(bounds.first_date),
            end.unwrap_or(bounds.last_date),
            min_steps.min(bounds.max_steps),
        )
    }

    /// `true` when `row` passes both the date range and the step threshold.
    pub fn matches(&self, row: &MergedDailyRecord) -> bool {
        let date = row.activity.date;
        self.start <= date && date <= self.end && row.activity.total_steps >= self.min_steps
    }

    /// Rows of `table` that pass the filter, in table order.
    pub fn apply<'a>(&self, table: &'a DailyTable) -> Vec<&'a MergedDailyRecord> {
        table.rows.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn increase_min_steps(&mut self, bounds: &FilterBounds) {
        self.min_steps = (self.min_steps + STEP_INCREMENT).min(bounds.max_steps);
    }

    pub fn decrease_min_steps(&mut self) {
        self.min_steps = self.min_steps.saturating_sub(STEP_INCREMENT);
    }

    /// Move the start date by `days`, staying within the data and never
    /// passing the end date.
    pub fn shift_start(&mut self, days: i64, bounds: &FilterBounds) {
        let moved = shift_date(self.start, days);
        self.start = moved.clamp(bounds.first_date.min(self.end), self.end);
    }

    /// Move the end date by `days`, staying within the data and never
    /// passing the start date.
    pub fn shift_end(&mut self, days: i64, bounds: &FilterBounds) {
        let moved = shift_date(self.end, days);
        self.end = moved.clamp(self.start, bounds.last_date.max(self.start));
    }
}

fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = chrono::Duration::days(days);
    date.checked_add_signed(delta)
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

// ── Series ────────────────────────────────────────────────────────────────────

/// One day in the steps-vs-calories scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPoint {
    pub steps: u64,
    pub calories: u32,
    pub very_active_minutes: u32,
    pub total_distance: f64,
    pub date: NaiveDate,
    pub weekday: Weekday,
}

pub fn steps_vs_calories(rows: &[&MergedDailyRecord]) -> Vec<ActivityPoint> {
    rows.iter()
        .map(|r| ActivityPoint {
            steps: r.activity.total_steps,
            calories: r.activity.calories,
            very_active_minutes: r.activity.very_active_minutes,
            total_distance: r.activity.total_distance,
            date: r.activity.date,
            weekday: r.activity.weekday,
        })
        .collect()
}

/// Mean step count over the filtered days falling on one weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    pub average_steps: f64,
    pub days: usize,
}

/// Mean steps per weekday, Monday first. Weekdays with no rows are left out.
pub fn average_steps_by_weekday(rows: &[&MergedDailyRecord]) -> Vec<WeekdayAverage> {
    let mut totals = [(0u64, 0usize); 7];
    for r in rows {
        let slot = &mut totals[weekday_index(r.activity.weekday)];
        slot.0 += r.activity.total_steps;
        slot.1 += 1;
    }

    WEEKDAY_ORDER
        .iter()
        .zip(totals)
        .filter(|(_, (_, days))| *days > 0)
        .map(|(&weekday, (sum, days))| WeekdayAverage {
            weekday,
            average_steps: sum as f64 / days as f64,
            days,
        })
        .collect()
}

/// One day in the sleep-vs-steps scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepPoint {
    pub minutes_asleep: i64,
    pub steps: u64,
    pub calories: u32,
    pub date: NaiveDate,
}

/// Non-fatal notice that a chart has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyResultWarning {
    pub message: String,
}

impl std::fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SleepView {
    Points(Vec<SleepPoint>),
    Unavailable(EmptyResultWarning),
}

/// Sleep-vs-steps points for rows with a sleep value.
///
/// Yields the warning when the table has no sleep column or none of the
/// filtered rows has a value.
pub fn sleep_correlation(has_sleep_column: bool, rows: &[&MergedDailyRecord]) -> SleepView {
    let points: Vec<SleepPoint> = if has_sleep_column {
        rows.iter()
            .filter_map(|r| {
                r.total_minutes_asleep.map(|minutes| SleepPoint {
                    minutes_asleep: minutes,
                    steps: r.activity.total_steps,
                    calories: r.activity.calories,
                    date: r.activity.date,
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    if points.is_empty() {
        SleepView::Unavailable(EmptyResultWarning {
            message: EMPTY_SLEEP_WARNING.to_string(),
        })
    } else {
        SleepView::Points(points)
    }
}

// ── View ──────────────────────────────────────────────────────────────────────

/// Everything the dashboard renders for one filter setting.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub filter: DashboardFilter,
    pub total_rows: usize,
    pub filtered_rows: usize,
    /// First [`OVERVIEW_ROWS`] filtered rows.
    pub overview: Vec<MergedDailyRecord>,
    pub has_sleep_column: bool,
    /// Set when the sleep export could not be loaded.
    pub sleep_error: Option<String>,
    pub activity: Vec<ActivityPoint>,
    pub weekday_averages: Vec<WeekdayAverage>,
    pub sleep: SleepView,
}

impl DashboardView {
    pub fn build(table: &DailyTable, filter: &DashboardFilter) -> Self {
        let rows = filter.apply(table);
        tracing::trace!(
            filtered = rows.len(),
            total = table.len(),
            min_steps = filter.min_steps,
            "dashboard view built"
        );

        Self {
            filter: *filter,
            total_rows: table.len(),
            filtered_rows: rows.len(),
            overview: rows.iter().take(OVERVIEW_ROWS).map(|r| (*r).clone()).collect(),
            has_sleep_column: table.has_sleep_column(),
            sleep_error: table.sleep_unavailable_reason().map(str::to_string),
            activity: steps_vs_calories(&rows),
            weekday_averages: average_steps_by_weekday(&rows),
            sleep: sleep_correlation(table.has_sleep_column(), &rows),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
