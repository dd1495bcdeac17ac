use anyhow::Result;
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "PODCASTR_LOG";

pub fn log_file_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("podcastr")
        .join("logs")
        .join("podcastr.log")
}

/// Resolve the effective level: `PODCASTR_LOG` wins over the settings value,
/// unknown names fall back to `info`.
pub fn resolve_level(configured: &str, env_override: Option<&str>) -> LevelFilter {
    let name = env_override.unwrap_or(configured);
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Send all log output to the log file. The terminal belongs to the TUI.
pub fn init(configured_level: &str) -> Result<PathBuf> {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = resolve_level(configured_level, env_level.as_deref());
    let path = log_file_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // rodio/symphonia are chatty at debug
        .level_for("symphonia_core", LevelFilter::Warn)
        .level_for("symphonia_bundle_mp3", LevelFilter::Warn)
        .chain(fern::log_file(&path)?)
        .apply()?;

    log::info!("Logging at {} to {}", level, path.display());
    Ok(path)
}

// Helper to redirect stderr to log file during audio operations
pub struct RedirectStderrToLog {
    original_stderr: Option<std::fs::File>,
}

impl RedirectStderrToLog {
    pub fn new(log_file: &Path) -> Self {
        use std::os::unix::io::{AsRawFd, FromRawFd};

        unsafe {
            // Save original stderr
            let original_stderr_fd = libc::dup(2);
            let original_stderr = if original_stderr_fd >= 0 {
                Some(std::fs::File::from_raw_fd(original_stderr_fd))
            } else {
                None
            };

            // Open log file for appending
            if let Ok(log_file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file) {
                // Redirect stderr to log file
                libc::dup2(log_file.as_raw_fd(), 2);
            }

            RedirectStderrToLog { original_stderr }
        }
    }
}

impl Drop for RedirectStderrToLog {
    fn drop(&mut self) {
        if let Some(original_stderr) = self.original_stderr.take() {
            use std::os::unix::io::AsRawFd;
            unsafe {
                // Restore original stderr
                libc::dup2(original_stderr.as_raw_fd(), 2);
            }
        }
    }
}
