use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user application directory under `$HOME`.
pub const APP_DIR: &str = ".sales-dashboard";

/// File name of the default dashboard log.
pub const LOG_FILE_NAME: &str = "dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.sales-dashboard/logs/` exists and return its path.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let logs_dir = home.join(APP_DIR).join("logs");
    std::fs::create_dir_all(&logs_dir)?;
    Ok(logs_dir)
}

/// Default log file inside `logs_dir`.
pub fn default_log_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(LOG_FILE_NAME)
}

/// Where logs go: an explicit `--log-file` wins; the interactive dashboard
/// otherwise logs to the default file so output does not overdraw the TUI;
/// the other views log to stderr (`None`).
pub fn log_destination(
    explicit: Option<&Path>,
    interactive: bool,
    logs_dir: &Path,
) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if interactive => Some(default_log_path(logs_dir)),
        None => None,
    }
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name onto an `EnvFilter` directive.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Writes to `log_file` (appending, no ANSI colours) when given, otherwise
/// to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── ensure_directories ────────────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let logs_dir = result.expect("ensure_directories should succeed");
        assert_eq!(logs_dir, tmp.path().join(APP_DIR).join("logs"));
        assert!(logs_dir.is_dir(), "logs dir must exist");
    }

    // ── log_destination ───────────────────────────────────────────────────────

    #[test]
    fn test_log_destination_explicit_file_wins() {
        let logs = Path::new("/home/u/.sales-dashboard/logs");
        let explicit = Path::new("/tmp/run.log");
        assert_eq!(
            log_destination(Some(explicit), true, logs),
            Some(PathBuf::from("/tmp/run.log"))
        );
        assert_eq!(
            log_destination(Some(explicit), false, logs),
            Some(PathBuf::from("/tmp/run.log"))
        );
    }

    #[test]
    fn test_log_destination_dashboard_defaults_to_file() {
        let logs = Path::new("/home/u/.sales-dashboard/logs");
        assert_eq!(
            log_destination(None, true, logs),
            Some(logs.join(LOG_FILE_NAME))
        );
    }

    #[test]
    fn test_log_destination_summary_uses_stderr() {
        let logs = Path::new("/home/u/.sales-dashboard/logs");
        assert_eq!(log_destination(None, false, logs), None);
    }

    // ── level_directive ───────────────────────────────────────────────────────

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("error"), "error");
        assert_eq!(level_directive("verbose"), "info");
    }
}
