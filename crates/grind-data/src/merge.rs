//! Left join of daily sleep totals onto activity rows.

use std::collections::HashMap;

use chrono::NaiveDate;
use grind_core::models::{ActivityRecord, DailySleepSummary, MergedDailyRecord};

/// Attach each activity row's sleep total, keyed on (subject id, date).
///
/// Every activity row appears exactly once in the output, in input order.
/// Rows without a matching summary get `None`. Duplicate summary keys are
/// summed so a row is never repeated.
pub fn merge(
    activity: Vec<ActivityRecord>,
    sleep_summary: &[DailySleepSummary],
) -> Vec<MergedDailyRecord> {
    let mut by_key: HashMap<(&str, NaiveDate), i64> = HashMap::with_capacity(sleep_summary.len());
    for summary in sleep_summary {
        *by_key
            .entry((summary.id.as_str(), summary.date))
            .or_insert(0) += summary.total_minutes_asleep;
    }

    activity
        .into_iter()
        .map(|record| {
            let total_minutes_asleep = by_key.get(&(record.id.as_str(), record.date)).copied();
            MergedDailyRecord {
                activity: record,
                total_minutes_asleep,
            }
        })
        .collect()
}
