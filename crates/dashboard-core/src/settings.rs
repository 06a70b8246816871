use clap::Parser;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales data dashboard: clean a sales spreadsheet and chart revenue
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Clean a sales spreadsheet and chart revenue in the terminal",
    version
)]
pub struct Settings {
    /// Spreadsheet to load (xlsx, xlsm, xlsb, xls, ods)
    #[arg(value_name = "FILE")]
    pub file_arg: Option<PathBuf>,

    /// Spreadsheet to load; same as the positional FILE
    #[arg(long = "file", value_name = "FILE", conflicts_with = "file_arg")]
    pub file_flag: Option<PathBuf>,

    /// Worksheet name (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Number of raw rows shown in the preview (1-50)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub preview_rows: u16,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Parse an explicit argument list, then apply `--debug`.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The spreadsheet to load, from either the positional argument or
    /// `--file`.
    pub fn file(&self) -> Option<&PathBuf> {
        self.file_arg.as_ref().or(self.file_flag.as_ref())
    }

    /// Whether the interactive terminal dashboard was requested.
    pub fn is_interactive(&self) -> bool {
        self.view == "dashboard"
    }

    pub fn preview_rows(&self) -> usize {
        usize::from(self.preview_rows)
    }

    /// Reject a sheet name without a file to read it from.
    pub fn validate(&self) -> Result<()> {
        if self.sheet.is_some() && self.file().is_none() && !self.is_interactive() {
            return Err(DashboardError::Config(
                "--sheet requires a spreadsheet file".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
