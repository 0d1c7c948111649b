use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{SourceFolders, DEFAULT_FOLDER1, DEFAULT_FOLDER2};
use crate::time_utils::parse_cli_date;

/// Default minimum-steps filter applied on startup.
pub const DEFAULT_MIN_STEPS: u64 = 5000;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Daily activity insights from exported Fitbit data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "grindgraph",
    about = "Daily activity insights from exported Fitbit data",
    version
)]
pub struct Settings {
    /// Folder with the first period's CSV exports
    #[arg(long, default_value = DEFAULT_FOLDER1)]
    pub folder1: PathBuf,

    /// Folder with the second period's CSV exports
    #[arg(long, default_value = DEFAULT_FOLDER2)]
    pub folder2: PathBuf,

    /// First day shown (YYYY-MM-DD, defaults to the earliest date in the data)
    #[arg(long, value_parser = parse_cli_date)]
    pub start_date: Option<NaiveDate>,

    /// Last day shown (YYYY-MM-DD, defaults to the latest date in the data)
    #[arg(long, value_parser = parse_cli_date)]
    pub end_date: Option<NaiveDate>,

    /// Hide days with fewer total steps than this
    #[arg(long, default_value_t = DEFAULT_MIN_STEPS)]
    pub min_steps: u64,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "overview"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.grindgraph/logs/grindgraph.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.grindgraph/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_steps: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder1: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder2: Option<PathBuf>,
}

impl LastUsedParams {
    /// Default path of the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".grindgraph").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable last-used config");
                Self::default()
            }
        }
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> crate::error::Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit args and config
    /// path, so tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear last-used config");
            }
            return Self::resolve_overrides(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Date bounds are never remembered.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "min_steps") {
            if let Some(v) = last.min_steps {
                settings.min_steps = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "folder1") {
            if let Some(v) = last.folder1 {
                settings.folder1 = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "folder2") {
            if let Some(v) = last.folder2 {
                settings.folder2 = v;
            }
        }

        settings = Self::resolve_overrides(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used config");
        }

        settings
    }

    /// The two export folders to load.
    pub fn sources(&self) -> SourceFolders {
        SourceFolders::new(self.folder1.clone(), self.folder2.clone())
    }

    /// Apply `--debug`.
    fn resolve_overrides(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            min_steps: Some(s.min_steps),
            folder1: Some(s.folder1.clone()),
            folder2: Some(s.folder2.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
///
/// clap stores the arg id under the field name (underscores).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("overview".to_string()),
            min_steps: Some(7500),
            folder1: Some(PathBuf::from("/exports/march")),
            folder2: Some(PathBuf::from("/exports/april")),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.view, Some("overview".to_string()));
        assert_eq!(loaded.min_steps, Some(7500));
        assert_eq!(loaded.folder1, Some(PathBuf::from("/exports/march")));
        assert_eq!(loaded.folder2, Some(PathBuf::from("/exports/april")));
    }

    #[test]
    fn test_last_used_params_default_when_missing_or_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        assert!(LastUsedParams::load_from(&path).theme.is_none());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        let loaded = LastUsedParams::load_from(&path);
        assert!(loaded.min_steps.is_none());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&path).expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["grindgraph"]);

        assert_eq!(settings.folder1, PathBuf::from(DEFAULT_FOLDER1));
        assert_eq!(settings.folder2, PathBuf::from(DEFAULT_FOLDER2));
        assert!(settings.start_date.is_none());
        assert!(settings.end_date.is_none());
        assert_eq!(settings.min_steps, DEFAULT_MIN_STEPS);
        assert_eq!(settings.view, "dashboard");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_cli_dates() {
        let settings = Settings::parse_from([
            "grindgraph",
            "--start-date",
            "2016-04-01",
            "--end-date",
            "2016-04-30",
        ]);
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2016, 4, 1));
        assert_eq!(settings.end_date, NaiveDate::from_ymd_opt(2016, 4, 30));
    }

    #[test]
    fn test_settings_cli_rejects_bad_date() {
        let result = Settings::try_parse_from(["grindgraph", "--start-date", "4/1/2016"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_sources() {
        let settings =
            Settings::parse_from(["grindgraph", "--folder1", "/x", "--folder2", "/y"]);
        assert_eq!(settings.sources(), SourceFolders::new("/x", "/y"));
    }

    #[test]
    fn test_load_with_last_used_merges_persisted_values() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("classic".to_string()),
            min_steps: Some(2500),
            folder1: Some(PathBuf::from("/saved/one")),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(vec!["grindgraph".into()], &config_path);
        assert_eq!(settings.theme, "classic");
        assert_eq!(settings.min_steps, 2500);
        assert_eq!(settings.folder1, PathBuf::from("/saved/one"));
        assert_eq!(settings.folder2, PathBuf::from(DEFAULT_FOLDER2));
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            min_steps: Some(2500),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["grindgraph".into(), "--min-steps".into(), "9000".into()],
            &config_path,
        );
        assert_eq!(settings.min_steps, 9000);
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&config_path).expect("save");

        Settings::load_with_last_used_impl(
            vec!["grindgraph".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = Settings::load_with_last_used_impl(
            vec!["grindgraph".into(), "--debug".into()],
            &tmp_config_path(&tmp),
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec!["grindgraph".into(), "--view".into(), "overview".into()],
            &config_path,
        );

        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.view, Some("overview".to_string()));
        assert_eq!(loaded.min_steps, Some(DEFAULT_MIN_STEPS));
    }
}
