mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::analysis::analyze_file;
use dashboard_data::report::{build_report, to_json, PROMPT_TEXT};
use dashboard_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;

    let logs_dir = bootstrap::ensure_directories()?;
    let log_file = bootstrap::log_destination(
        settings.log_file.as_deref(),
        settings.is_interactive(),
        &logs_dir,
    );
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    match settings.view.as_str() {
        "dashboard" => {
            let mut app = App::new(
                &settings.theme,
                settings.sheet.clone(),
                settings.preview_rows(),
            );
            if let Some(path) = settings.file() {
                app.load(path);
            }
            app.run()?;
        }

        "summary" | "json" => {
            let Some(path) = settings.file() else {
                println!("{PROMPT_TEXT}");
                return Ok(());
            };

            let data = analyze_file(path, settings.sheet.as_deref(), settings.preview_rows())
                .with_context(|| format!("Failed to process {}", path.display()))?;

            if settings.view == "json" {
                println!("{}", to_json(&data)?);
            } else {
                print!("{}", build_report(&data));
            }
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
