//! Activity cleaning: the raw `ActivityDate` string becomes a parsed `Date`
//! and each row gets its weekday.

use chrono::Datelike;
use grind_core::error::Result;
use grind_core::models::{ActivityRecord, RawActivityRow};
use grind_core::time_utils::parse_activity_date;

/// Parse every row's date and derive its weekday.
///
/// Fails on the first unparsable date rather than dropping or coercing it.
pub fn normalize_activity(rows: Vec<RawActivityRow>) -> Result<Vec<ActivityRecord>> {
    rows.into_iter().map(normalize_row).collect()
}

fn normalize_row(row: RawActivityRow) -> Result<ActivityRecord> {
    let date = parse_activity_date(&row.activity_date)?;
    Ok(ActivityRecord {
        id: row.id,
        date,
        weekday: date.weekday(),
        total_steps: row.total_steps,
        total_distance: row.total_distance,
        tracker_distance: row.tracker_distance,
        logged_activities_distance: row.logged_activities_distance,
        very_active_distance: row.very_active_distance,
        moderately_active_distance: row.moderately_active_distance,
        light_active_distance: row.light_active_distance,
        sedentary_active_distance: row.sedentary_active_distance,
        very_active_minutes: row.very_active_minutes,
        fairly_active_minutes: row.fairly_active_minutes,
        lightly_active_minutes: row.lightly_active_minutes,
        sedentary_minutes: row.sedentary_minutes,
        calories: row.calories,
    })
}
