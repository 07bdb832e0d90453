//! File-based logging for the `cubed` command.
//!
//! Each run writes to `~/.cubed/logs/{run_metadata}/log` and mirrors every
//! message to stderr. Logging to the file can be turned off, in which case
//! only stderr is used.

use anyhow::{Context, Result};
use chrono::Local;
use dirs::home_dir;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct CubedLogger {
    level: LevelFilter,
    file: Option<Arc<Mutex<File>>>,
    run_id: String,
    log_path: Option<PathBuf>,
}

impl CubedLogger {
    /// Creates a logger for this run.
    ///
    /// With `to_file`, this creates the log file at
    /// ~/.cubed/logs/{timestamp}_{uuid}/log.
    pub fn new(level: LevelFilter, to_file: bool) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let uuid_string = Uuid::new_v4().to_string();
        let uuid = uuid_string.split('-').next().unwrap_or("unknown");
        let run_id = format!("{timestamp}_{uuid}");

        if !to_file {
            return Ok(Self {
                level,
                file: None,
                run_id,
                log_path: None,
            });
        }

        let log_dir = Self::get_log_dir(&run_id)?;
        create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            level,
            file: Some(Arc::new(Mutex::new(file))),
            run_id,
            log_path: Some(log_path),
        })
    }

    /// Returns the path to the log directory for a run
    pub fn get_log_dir(run_id: &str) -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".cubed").join("logs").join(run_id))
    }

    /// Installs the logger as the global `log` backend.
    pub fn init(level: LevelFilter, to_file: bool) -> Result<()> {
        let logger = Self::new(level, to_file)?;
        let run_id = logger.run_id.clone();
        let log_path = logger.log_path.clone();

        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;

        log::info!("cubed logger initialized. Run ID: {}", run_id);
        if let Some(path) = log_path {
            log::info!("Log file: {}", path.display());
        }
        Ok(())
    }

    fn format(record: &Record) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{} {} [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for CubedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = Self::format(record);

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                // a failed write must not abort rendering
                let _ = writeln!(file, "{}", message);
                let _ = file.flush();
            }
        }

        eprintln!("{}", message);
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Marks the start of a new step in the log.
pub fn log_section(name: &str) {
    let separator = "=".repeat(50);
    log::info!("{}", separator);
    log::info!("SECTION: {}", name);
    log::info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_only_logger() {
        let logger = CubedLogger::new(LevelFilter::Debug, false).unwrap();

        assert!(logger.file.is_none());
        assert!(logger.log_path.is_none());
        assert!(logger.run_id.contains('_'));
        assert!(logger.enabled(&Metadata::builder().level(log::Level::Debug).build()));
        assert!(!logger.enabled(&Metadata::builder().level(log::Level::Trace).build()));
    }

    #[test]
    fn test_log_dir_layout() {
        if let Ok(dir) = CubedLogger::get_log_dir("20260101_000000_abcd") {
            assert!(dir.ends_with(".cubed/logs/20260101_000000_abcd"));
        }
    }
}
