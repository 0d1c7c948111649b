//! Top-level ingestion pipeline.
//!
//! Loads both periods' activity exports, cleans them, rolls the sleep
//! exports up to daily totals and left-joins them, returning a
//! [`DailyTable`] ready for the dashboard.

use std::time::{Duration, Instant};

use grind_core::error::Result;
use grind_core::models::{
    ActivityRecord, DailySleepSummary, DailyTable, LoadMetadata, MergedDailyRecord, SleepStatus,
    SourceFolders,
};
use tracing::{debug, error, info};

use crate::aggregator::aggregate_daily_sleep;
use crate::merge::merge;
use crate::normalize::normalize_activity;
use crate::reader::{load_activity_tables, load_sleep_samples};

/// Run the full pipeline.
///
/// 1. Load and concatenate both activity exports.
/// 2. Parse dates and derive weekdays.
/// 3. Load and concatenate both sleep exports.
/// 4. Sum sleep values per subject-day.
/// 5. Left-join the totals onto the activity rows.
///
/// Any activity failure is returned as an error. A missing sleep file is
/// logged and degrades the result to an activity-only table whose
/// [`SleepStatus`] names the missing path; other sleep errors are returned.
pub fn load_data(sources: &SourceFolders) -> Result<DailyTable> {
    let mut load_time = Duration::ZERO;
    let mut transform_time = Duration::ZERO;

    // ── Steps 1-2: Activity ───────────────────────────────────────────────────
    let started = Instant::now();
    let raw_activity = load_activity_tables(&sources.activity_paths())?;
    load_time += started.elapsed();

    let started = Instant::now();
    let activity = normalize_activity(raw_activity)?;
    transform_time += started.elapsed();

    let mut metadata = LoadMetadata {
        activity_rows: activity.len(),
        ..LoadMetadata::default()
    };

    // ── Steps 3-4: Sleep ──────────────────────────────────────────────────────
    let started = Instant::now();
    let sleep = load_sleep_samples(&sources.sleep_paths());
    load_time += started.elapsed();

    let started = Instant::now();
    let summary = sleep.and_then(|samples| {
        metadata.sleep_samples = samples.len();
        aggregate_daily_sleep(&samples)
    });

    let (rows, status) = match summary {
        // ── Step 5: Merge ─────────────────────────────────────────────────────
        Ok(summary) => {
            metadata.sleep_days = summary.len();
            (merge_and_count(activity, &summary, &mut metadata), SleepStatus::Merged)
        }
        Err(e) if e.is_missing_file() => {
            error!("FATAL ERROR: Sleep file not found. Check path: {}", e);
            let rows = activity
                .into_iter()
                .map(MergedDailyRecord::without_sleep)
                .collect();
            (rows, SleepStatus::Unavailable { reason: e.to_string() })
        }
        Err(e) => return Err(e),
    };
    transform_time += started.elapsed();

    metadata.load_time_seconds = load_time.as_secs_f64();
    metadata.transform_time_seconds = transform_time.as_secs_f64();

    info!(
        rows = metadata.activity_rows,
        sleep_days = metadata.sleep_days,
        rows_with_sleep = metadata.rows_with_sleep,
        sleep_merged = matches!(status, SleepStatus::Merged),
        "daily table ready"
    );

    Ok(DailyTable {
        rows,
        sleep: status,
        metadata,
    })
}

fn merge_and_count(
    activity: Vec<ActivityRecord>,
    summary: &[DailySleepSummary],
    metadata: &mut LoadMetadata,
) -> Vec<MergedDailyRecord> {
    let rows = merge(activity, summary);
    metadata.rows_with_sleep = rows
        .iter()
        .filter(|r| r.total_minutes_asleep.is_some())
        .count();
    debug!(
        matched = metadata.rows_with_sleep,
        unmatched = rows.len() - metadata.rows_with_sleep,
        "merged sleep totals"
    );
    rows
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use grind_core::models::{ACTIVITY_FILE_NAME, SLEEP_COLUMN, SLEEP_FILE_NAME};
    use grind_core::GrindError;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    const ACTIVITY_HEADER: &str = "Id,ActivityDate,TotalSteps,TotalDistance,VeryActiveMinutes,\
FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories";

    fn write_csv(dir: &Path, name: &str, lines: &[String]) {
        std::fs::create_dir_all(dir).unwrap();
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    fn write_activity(dir: &Path, rows: &[(&str, &str, u64)]) {
        let mut lines = vec![ACTIVITY_HEADER.to_string()];
        lines.extend(
            rows.iter()
                .map(|(id, date, steps)| format!("{id},{date},{steps},1.2,3,4,120,900,1700")),
        );
        write_csv(dir, ACTIVITY_FILE_NAME, &lines);
    }

    fn write_sleep(dir: &Path, rows: &[(&str, &str, i64)]) {
        let mut lines = vec!["Id,date,value,logId".to_string()];
        lines.extend(
            rows.iter()
                .map(|(id, ts, value)| format!("{id},{ts},{value},11114919637")),
        );
        write_csv(dir, SLEEP_FILE_NAME, &lines);
    }

    fn sources(tmp: &TempDir) -> SourceFolders {
        SourceFolders::new(tmp.path().join("period1"), tmp.path().join("period2"))
    }

    #[test]
    fn test_load_data_merges_sleep() {
        let tmp = TempDir::new().unwrap();
        let src = sources(&tmp);
        write_activity(&src.folder1, &[("1", "3/13/2016", 1000), ("2", "3/13/2016", 5000)]);
        write_activity(&src.folder2, &[("1", "4/13/2016", 2000)]);
        write_sleep(
            &src.folder1,
            &[
                ("1", "3/13/2016 1:00:00 AM", 1),
                ("1", "3/13/2016 1:01:00 AM", 1),
            ],
        );
        write_sleep(&src.folder2, &[("2", "4/20/2016 3:00:00 AM", 1)]);

        let table = load_data(&src).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.has_sleep_column());
        assert!(table.column_names().contains(&SLEEP_COLUMN));
        assert_eq!(table.rows[0].total_minutes_asleep, Some(2));
        assert_eq!(table.rows[1].total_minutes_asleep, None);
        assert_eq!(table.rows[2].total_minutes_asleep, None);
        assert_eq!(table.metadata.activity_rows, 3);
        assert_eq!(table.metadata.sleep_samples, 3);
        assert_eq!(table.metadata.sleep_days, 2);
        assert_eq!(table.metadata.rows_with_sleep, 1);
    }

    #[test]
    fn test_load_data_missing_sleep_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let src = sources(&tmp);
        write_activity(&src.folder1, &[("1", "3/13/2016", 1000)]);
        write_activity(&src.folder2, &[("1", "4/13/2016", 2000)]);
        write_sleep(&src.folder1, &[("1", "3/13/2016 1:00:00 AM", 1)]);
        // No sleep export in period 2.

        let table = load_data(&src).unwrap();

        assert_eq!(table.len(), 2);
        assert!(!table.has_sleep_column());
        assert!(!table.column_names().contains(&SLEEP_COLUMN));
        assert!(table.rows.iter().all(|r| r.total_minutes_asleep.is_none()));
        let reason = table.sleep_unavailable_reason().unwrap();
        assert!(reason.contains(SLEEP_FILE_NAME), "reason: {reason}");
        assert!(reason.contains("period2"), "reason: {reason}");
    }

    #[test]
    fn test_load_data_missing_activity_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let src = sources(&tmp);
        write_activity(&src.folder1, &[("1", "3/13/2016", 1000)]);
        write_sleep(&src.folder1, &[]);
        write_sleep(&src.folder2, &[]);

        let err = load_data(&src).unwrap_err();
        match err {
            GrindError::MissingFile(path) => {
                assert_eq!(path, src.folder2.join(ACTIVITY_FILE_NAME));
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn test_load_data_bad_sleep_timestamp_is_not_swallowed() {
        let tmp = TempDir::new().unwrap();
        let src = sources(&tmp);
        write_activity(&src.folder1, &[("1", "3/13/2016", 1000)]);
        write_activity(&src.folder2, &[]);
        write_sleep(&src.folder1, &[("1", "garbage", 1)]);
        write_sleep(&src.folder2, &[]);

        let err = load_data(&src).unwrap_err();
        assert!(matches!(err, GrindError::TimestampParse(_)));
    }

    #[test]
    fn test_load_data_bad_activity_date_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let src = sources(&tmp);
        write_activity(&src.folder1, &[("1", "31/31/2016", 1000)]);
        write_activity(&src.folder2, &[]);

        let err = load_data(&src).unwrap_err();
        assert!(matches!(err, GrindError::DateParse(_)));
    }
}
