use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize, Serializer};

use crate::time_utils::weekday_name;

/// File name of the daily activity export inside each period folder.
pub const ACTIVITY_FILE_NAME: &str = "dailyActivity_merged.csv";

/// File name of the minute-level sleep export inside each period folder.
pub const SLEEP_FILE_NAME: &str = "minuteSleep_merged.csv";

/// Default folder holding the 3.12.16 to 4.11.16 export.
pub const DEFAULT_FOLDER1: &str =
    "data/mturkfitbit_export_3.12.16-4.11.16/Fitabase Data 3.12.16-4.11.16";

/// Default folder holding the 4.12.16 to 5.12.16 export.
pub const DEFAULT_FOLDER2: &str =
    "data/mturkfitbit_export_4.12.16-5.12.16/Fitabase Data 4.12.16-5.12.16";

/// Name of the optional sleep column in the merged table.
pub const SLEEP_COLUMN: &str = "TotalMinutesAsleep";

/// Columns every merged table carries, in output order.
pub const ACTIVITY_COLUMNS: &[&str] = &[
    "Id",
    "Date",
    "Weekday",
    "TotalSteps",
    "TotalDistance",
    "TrackerDistance",
    "LoggedActivitiesDistance",
    "VeryActiveDistance",
    "ModeratelyActiveDistance",
    "LightActiveDistance",
    "SedentaryActiveDistance",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
    "Calories",
];

// ── Source locations ──────────────────────────────────────────────────────────

/// The two export folders, one per calendar period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceFolders {
    pub folder1: PathBuf,
    pub folder2: PathBuf,
}

impl SourceFolders {
    pub fn new(folder1: impl Into<PathBuf>, folder2: impl Into<PathBuf>) -> Self {
        Self {
            folder1: folder1.into(),
            folder2: folder2.into(),
        }
    }

    /// Paths of both `dailyActivity_merged.csv` files.
    pub fn activity_paths(&self) -> [PathBuf; 2] {
        [
            self.folder1.join(ACTIVITY_FILE_NAME),
            self.folder2.join(ACTIVITY_FILE_NAME),
        ]
    }

    /// Paths of both `minuteSleep_merged.csv` files.
    pub fn sleep_paths(&self) -> [PathBuf; 2] {
        [
            self.folder1.join(SLEEP_FILE_NAME),
            self.folder2.join(SLEEP_FILE_NAME),
        ]
    }

    /// Borrow both folders as a pair.
    pub fn folders(&self) -> [&Path; 2] {
        [self.folder1.as_path(), self.folder2.as_path()]
    }
}

impl Default for SourceFolders {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER1, DEFAULT_FOLDER2)
    }
}

// ── Raw CSV rows ──────────────────────────────────────────────────────────────

/// One row of `dailyActivity_merged.csv` exactly as exported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawActivityRow {
    #[serde(rename = "Id")]
    pub id: String,
    /// Unparsed date, e.g. `"3/25/2016"`.
    #[serde(rename = "ActivityDate")]
    pub activity_date: String,
    #[serde(rename = "TotalSteps")]
    pub total_steps: u64,
    #[serde(rename = "TotalDistance")]
    pub total_distance: f64,
    #[serde(rename = "TrackerDistance", default)]
    pub tracker_distance: Option<f64>,
    #[serde(rename = "LoggedActivitiesDistance", default)]
    pub logged_activities_distance: Option<f64>,
    #[serde(rename = "VeryActiveDistance", default)]
    pub very_active_distance: Option<f64>,
    #[serde(rename = "ModeratelyActiveDistance", default)]
    pub moderately_active_distance: Option<f64>,
    #[serde(rename = "LightActiveDistance", default)]
    pub light_active_distance: Option<f64>,
    #[serde(rename = "SedentaryActiveDistance", default)]
    pub sedentary_active_distance: Option<f64>,
    #[serde(rename = "VeryActiveMinutes")]
    pub very_active_minutes: u32,
    #[serde(rename = "FairlyActiveMinutes")]
    pub fairly_active_minutes: u32,
    #[serde(rename = "LightlyActiveMinutes")]
    pub lightly_active_minutes: u32,
    #[serde(rename = "SedentaryMinutes")]
    pub sedentary_minutes: u32,
    #[serde(rename = "Calories")]
    pub calories: u32,
}

/// One minute of recorded sleep state from `minuteSleep_merged.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SleepSample {
    #[serde(rename = "Id")]
    pub id: String,
    /// Unparsed timestamp, e.g. `"4/12/2016 2:47:30 AM"`.
    #[serde(rename = "date")]
    pub timestamp: String,
    /// Sleep-state code for this minute.
    pub value: i64,
    #[serde(rename = "logId", default)]
    pub log_id: Option<String>,
}

// ── Cleaned records ───────────────────────────────────────────────────────────

/// A daily activity row with its date parsed and weekday derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Weekday", serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    #[serde(rename = "TotalSteps")]
    pub total_steps: u64,
    #[serde(rename = "TotalDistance")]
    pub total_distance: f64,
    #[serde(rename = "TrackerDistance")]
    pub tracker_distance: Option<f64>,
    #[serde(rename = "LoggedActivitiesDistance")]
    pub logged_activities_distance: Option<f64>,
    #[serde(rename = "VeryActiveDistance")]
    pub very_active_distance: Option<f64>,
    #[serde(rename = "ModeratelyActiveDistance")]
    pub moderately_active_distance: Option<f64>,
    #[serde(rename = "LightActiveDistance")]
    pub light_active_distance: Option<f64>,
    #[serde(rename = "SedentaryActiveDistance")]
    pub sedentary_active_distance: Option<f64>,
    #[serde(rename = "VeryActiveMinutes")]
    pub very_active_minutes: u32,
    #[serde(rename = "FairlyActiveMinutes")]
    pub fairly_active_minutes: u32,
    #[serde(rename = "LightlyActiveMinutes")]
    pub lightly_active_minutes: u32,
    #[serde(rename = "SedentaryMinutes")]
    pub sedentary_minutes: u32,
    #[serde(rename = "Calories")]
    pub calories: u32,
}

impl ActivityRecord {
    /// English weekday name, e.g. `"Sunday"`.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Total recorded sleep value for one subject on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySleepSummary {
    pub id: String,
    pub date: NaiveDate,
    pub total_minutes_asleep: i64,
}

/// An activity row with the matching day's sleep total, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedDailyRecord {
    #[serde(flatten)]
    pub activity: ActivityRecord,
    /// `None` when no sleep was recorded for this subject-day.
    #[serde(
        rename = "TotalMinutesAsleep",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_minutes_asleep: Option<i64>,
}

impl MergedDailyRecord {
    /// Wrap an activity row with no sleep value.
    pub fn without_sleep(activity: ActivityRecord) -> Self {
        Self {
            activity,
            total_minutes_asleep: None,
        }
    }
}

// ── Output table ──────────────────────────────────────────────────────────────

/// Whether the sleep column made it into the merged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepStatus {
    /// Sleep totals were joined; individual rows may still lack a value.
    Merged,
    /// Sleep data could not be loaded; the column is absent from the schema.
    Unavailable { reason: String },
}

/// Row counts and timings gathered while building a [`DailyTable`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadMetadata {
    pub activity_rows: usize,
    pub sleep_samples: usize,
    pub sleep_days: usize,
    pub rows_with_sleep: usize,
    pub load_time_seconds: f64,
    pub transform_time_seconds: f64,
}

/// The single immutable artifact produced by the ingestion pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTable {
    pub rows: Vec<MergedDailyRecord>,
    pub sleep: SleepStatus,
    pub metadata: LoadMetadata,
}

impl DailyTable {
    /// `true` when the `TotalMinutesAsleep` column is part of the schema.
    pub fn has_sleep_column(&self) -> bool {
        matches!(self.sleep, SleepStatus::Merged)
    }

    /// Reason the sleep column is missing, if it is.
    pub fn sleep_unavailable_reason(&self) -> Option<&str> {
        match &self.sleep {
            SleepStatus::Merged => None,
            SleepStatus::Unavailable { reason } => Some(reason),
        }
    }

    /// Column names of this table, in output order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut cols = ACTIVITY_COLUMNS.to_vec();
        if self.has_sleep_column() {
            cols.push(SLEEP_COLUMN);
        }
        cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest dates in the table, or `None` when it is empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.activity.date).min()?;
        let max = self.rows.iter().map(|r| r.activity.date).max()?;
        Some((min, max))
    }

    /// Largest `TotalSteps` value, `0` for an empty table.
    pub fn max_steps(&self) -> u64 {
        self.rows
            .iter()
            .map(|r| r.activity.total_steps)
            .max()
            .unwrap_or(0)
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn record(id: &str, date: NaiveDate, steps: u64) -> ActivityRecord {
        ActivityRecord {
            id: id.to_string(),
            date,
            weekday: date.weekday(),
            total_steps: steps,
            total_distance: 1.5,
            tracker_distance: Some(1.5),
            logged_activities_distance: None,
            very_active_distance: None,
            moderately_active_distance: None,
            light_active_distance: None,
            sedentary_active_distance: None,
            very_active_minutes: 10,
            fairly_active_minutes: 5,
            lightly_active_minutes: 100,
            sedentary_minutes: 700,
            calories: 1800,
        }
    }

    fn table(rows: Vec<MergedDailyRecord>, sleep: SleepStatus) -> DailyTable {
        DailyTable {
            rows,
            sleep,
            metadata: LoadMetadata::default(),
        }
    }

    #[test]
    fn test_source_folders_paths() {
        let sources = SourceFolders::new("/a", "/b");
        let [a1, a2] = sources.activity_paths();
        assert_eq!(a1, PathBuf::from("/a/dailyActivity_merged.csv"));
        assert_eq!(a2, PathBuf::from("/b/dailyActivity_merged.csv"));
        let [s1, s2] = sources.sleep_paths();
        assert_eq!(s1, PathBuf::from("/a/minuteSleep_merged.csv"));
        assert_eq!(s2, PathBuf::from("/b/minuteSleep_merged.csv"));
    }

    #[test]
    fn test_source_folders_default() {
        let sources = SourceFolders::default();
        assert!(sources.folder1.ends_with("Fitabase Data 3.12.16-4.11.16"));
        assert!(sources.folder2.ends_with("Fitabase Data 4.12.16-5.12.16"));
    }

    #[test]
    fn test_column_names_with_sleep() {
        let t = table(vec![], SleepStatus::Merged);
        let cols = t.column_names();
        assert_eq!(cols.first(), Some(&"Id"));
        assert_eq!(cols.last(), Some(&SLEEP_COLUMN));
        assert!(t.has_sleep_column());
        assert!(t.sleep_unavailable_reason().is_none());
    }

    #[test]
    fn test_column_names_without_sleep() {
        let t = table(
            vec![],
            SleepStatus::Unavailable {
                reason: "gone".to_string(),
            },
        );
        assert!(!t.column_names().contains(&SLEEP_COLUMN));
        assert!(!t.has_sleep_column());
        assert_eq!(t.sleep_unavailable_reason(), Some("gone"));
    }

    #[test]
    fn test_date_bounds_and_max_steps() {
        let d1 = NaiveDate::from_ymd_opt(2016, 4, 20).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2016, 3, 12).unwrap();
        let t = table(
            vec![
                MergedDailyRecord::without_sleep(record("1", d1, 4000)),
                MergedDailyRecord::without_sleep(record("2", d2, 12000)),
            ],
            SleepStatus::Merged,
        );
        assert_eq!(t.date_bounds(), Some((d2, d1)));
        assert_eq!(t.max_steps(), 12000);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_empty_table_bounds() {
        let t = table(vec![], SleepStatus::Merged);
        assert!(t.is_empty());
        assert!(t.date_bounds().is_none());
        assert_eq!(t.max_steps(), 0);
    }

    #[test]
    fn test_merged_record_serializes_with_column_names() {
        let date = NaiveDate::from_ymd_opt(2016, 3, 13).unwrap();
        let merged = MergedDailyRecord {
            activity: record("1503960366", date, 1000),
            total_minutes_asleep: Some(300),
        };
        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(json["Id"], "1503960366");
        assert_eq!(json["Date"], "2016-03-13");
        assert_eq!(json["Weekday"], "Sunday");
        assert_eq!(json["TotalSteps"], 1000);
        assert_eq!(json["TotalMinutesAsleep"], 300);
    }

    #[test]
    fn test_absent_sleep_is_not_serialized_as_zero() {
        let date = NaiveDate::from_ymd_opt(2016, 4, 13).unwrap();
        let merged = MergedDailyRecord::without_sleep(record("1", date, 2000));
        let json = serde_json::to_value(&merged).unwrap();
        assert!(json.get("TotalMinutesAsleep").is_none());
        assert_eq!(json["Weekday"], "Wednesday");
    }
}
