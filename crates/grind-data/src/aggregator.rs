//! Daily roll-up of minute-level sleep samples.
//!
//! Every sample's `value` is added to its subject-day total, whatever state
//! code it carries. Fitbit encodes asleep/restless/awake as 1/2/3, so the
//! total can exceed the minutes actually spent asleep; the roll-up keeps the
//! literal sum so the merged numbers match the exported data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use grind_core::error::Result;
use grind_core::models::{DailySleepSummary, SleepSample};
use grind_core::time_utils::sleep_sample_date;

/// Sum sample values per (subject, calendar day).
///
/// Returns summaries sorted by subject id, then date. The result does not
/// depend on the order of `samples`.
pub fn aggregate_daily_sleep(samples: &[SleepSample]) -> Result<Vec<DailySleepSummary>> {
    // BTreeMap keeps the keys sorted.
    let mut totals: BTreeMap<(&str, NaiveDate), i64> = BTreeMap::new();

    for sample in samples {
        let date = sleep_sample_date(&sample.timestamp)?;
        *totals.entry((sample.id.as_str(), date)).or_insert(0) += sample.value;
    }

    Ok(totals
        .into_iter()
        .map(|((id, date), total)| DailySleepSummary {
            id: id.to_string(),
            date,
            total_minutes_asleep: total,
        })
        .collect())
}
