//! CSV loading for the Fitbit daily activity and minute sleep exports.
//!
//! Each loader reads the same file from both period folders and concatenates
//! the rows in folder order. Rows are never deduplicated: the two folders
//! cover different calendar periods for the same cohort.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use grind_core::error::{GrindError, Result};
use grind_core::models::{RawActivityRow, SleepSample};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Headers `dailyActivity_merged.csv` must carry.
pub const ACTIVITY_REQUIRED_COLUMNS: &[&str] = &[
    "Id",
    "ActivityDate",
    "TotalSteps",
    "TotalDistance",
    "Calories",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
];

/// Headers `minuteSleep_merged.csv` must carry.
pub const SLEEP_REQUIRED_COLUMNS: &[&str] = &["Id", "date", "value"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Read both periods' activity exports and concatenate them.
///
/// Fails with [`GrindError::MissingFile`] naming the path when either file
/// is absent; no partial table is returned.
pub fn load_activity_tables<P: AsRef<Path>>(paths: &[P; 2]) -> Result<Vec<RawActivityRow>> {
    let mut rows = Vec::new();
    for path in paths {
        let period = read_csv_rows::<RawActivityRow>(path.as_ref(), ACTIVITY_REQUIRED_COLUMNS)?;
        rows.extend(period);
    }
    debug!(rows = rows.len(), "loaded activity tables");
    Ok(rows)
}

/// Read both periods' minute-level sleep exports and concatenate them.
pub fn load_sleep_samples<P: AsRef<Path>>(paths: &[P; 2]) -> Result<Vec<SleepSample>> {
    let mut samples = Vec::new();
    for path in paths {
        let period = read_csv_rows::<SleepSample>(path.as_ref(), SLEEP_REQUIRED_COLUMNS)?;
        samples.extend(period);
    }
    debug!(samples = samples.len(), "loaded sleep samples");
    Ok(samples)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Open `path`, mapping a not-found error to [`GrindError::MissingFile`].
fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GrindError::MissingFile(path.to_path_buf()),
        _ => GrindError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// Deserialize every record of `path` into `T` after checking that all
/// `required` headers are present.
fn read_csv_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let file = open_source(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| GrindError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    if let Some(column) = required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(GrindError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        });
    }

    let rows = reader
        .deserialize::<T>()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| GrindError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("File {}: {} rows", path.display(), rows.len());
    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
