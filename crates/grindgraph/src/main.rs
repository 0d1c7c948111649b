mod bootstrap;

use anyhow::{anyhow, Result};
use grind_core::settings::Settings;
use grind_core::GrindError;
use grind_runtime::dashboard::{DashboardFilter, FilterBounds};
use grind_runtime::data_manager::DataManager;
use grind_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(bootstrap::default_log_path);
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("GrindGraph v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Folders: {} | {}",
        settings.view,
        settings.theme,
        settings.folder1.display(),
        settings.folder2.display()
    );

    let mut data = DataManager::new(settings.sources());

    // First load happens before the terminal is taken over so a fatal error
    // prints normally.
    let (filter, bounds) = {
        let table = match data.get_data() {
            Ok(table) => table,
            Err(GrindError::MissingFile(path)) => {
                tracing::error!(path = %path.display(), "activity export missing");
                return Err(anyhow!("Activity data file not found: {}", path.display()));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            rows = table.len(),
            rows_with_sleep = table.metadata.rows_with_sleep,
            load_secs = table.metadata.load_time_seconds,
            transform_secs = table.metadata.transform_time_seconds,
            "data loaded"
        );
        let filter = DashboardFilter::with_overrides(
            table,
            settings.start_date,
            settings.end_date,
            settings.min_steps,
        )?;
        (filter, FilterBounds::of(table))
    };

    let app = App::new(
        &settings.theme,
        ViewMode::from_name(&settings.view),
        filter,
        bounds,
    );
    app.run(&mut data)?;

    tracing::info!("GrindGraph exiting");
    Ok(())
}
